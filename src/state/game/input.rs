//! Hit matching: resolves a strike to the nearest unjudged note of its category.

use super::{JudgeSession, JudgementOutcome};
use crate::models::engine::{DrumCategory, HitWindow, InputTarget};

impl JudgeSession {
    /// Judges a key-down on mania lane `lane` at `now`.
    pub fn judge_hit(&mut self, lane: usize, now: f64) -> Option<JudgementOutcome> {
        self.judge_input(InputTarget::Lane(lane), now)
    }

    /// Judges a taiko strike of `category` at `now`.
    pub fn judge_taiko(&mut self, category: DrumCategory, now: f64) -> Option<JudgementOutcome> {
        self.judge_input(InputTarget::Drum(category), now)
    }

    /// Judges a strike on `target` at the session's current time.
    ///
    /// Ignored until the clock has been advanced at least once, including
    /// after [`JudgeSession::reset_judging`].
    pub fn strike(&mut self, target: InputTarget) -> Option<JudgementOutcome> {
        if !self.clock.is_initialized() {
            log::trace!("SESSION: {:?} struck before the clock started", target);
            return None;
        }
        let now = self.now();
        self.judge_input(target, now)
    }

    /// Matches a strike to the closest unjudged note of the same class within
    /// the Miss window.
    ///
    /// Returns `None`, with no state change, when nothing is in range, when no
    /// usable hit window is configured, or after the session has ended. Ties go
    /// to the earlier note.
    pub fn judge_input(&mut self, target: InputTarget, now: f64) -> Option<JudgementOutcome> {
        if self.is_ended() {
            return None;
        }
        let window = self.window.filter(HitWindow::is_usable)?;
        let miss_ms = window.miss_ms;

        let mut best: Option<(usize, f64)> = None;
        for index in self.head_index..self.schedule.len() {
            let diff = self.schedule.time(index) - now;
            if diff > miss_ms {
                break;
            }
            if self.schedule.is_judged(index) || self.schedule.class(index) != target {
                continue;
            }
            if best.is_none_or(|(_, best_diff)| diff.abs() < best_diff.abs()) {
                best = Some((index, diff));
            }
        }

        let (index, diff) = best?;
        let judgement = window.judge(diff)?;
        if !self.schedule.try_judge(index) {
            return None;
        }

        let outcome = self.judging.apply(index, judgement, diff);
        self.advance_head();

        log::trace!(
            "SESSION: {:?} note {} -> {} ({:+.1}ms, combo {})",
            target,
            index,
            judgement,
            diff,
            outcome.combo
        );
        if outcome.life_depleted {
            log::info!("SESSION: Life depleted at note {}", index);
        }

        Some(outcome)
    }
}
