//! Expiry sweep and the judging control surface.

use super::{JudgeSession, JudgementOutcome};
use crate::models::stats::Judgement;

impl JudgeSession {
    /// Force-misses every unjudged note with `time - now < -miss`.
    ///
    /// The swept span starts at the head index rather than at the visible
    /// range, so notes that fell below the range after a hitch or a seek, or
    /// because the Miss window is wider than the past window, still expire.
    pub fn sweep_misses(&mut self, now: f64) -> Vec<JudgementOutcome> {
        let mut outcomes = Vec::new();
        if self.is_ended() {
            return outcomes;
        }

        let miss_ms = self.expiry_window_ms();
        let range = self.visible_range(now);
        let start = self.head_index.min(range.start);

        for index in start..range.end {
            if self.schedule.is_judged(index) {
                continue;
            }
            let diff = self.schedule.time(index) - now;
            if diff >= -miss_ms {
                break;
            }
            if self.schedule.try_judge(index) {
                outcomes.push(self.judging.apply(index, Judgement::Miss, diff));
            }
        }

        if !outcomes.is_empty() {
            self.advance_head();
            log::debug!(
                "SESSION: Expired {} note(s) at {:.1}ms (head {})",
                outcomes.len(),
                now,
                self.head_index
            );
            if outcomes.iter().any(|o| o.life_depleted) {
                log::info!("SESSION: Life depleted at {:.1}ms", now);
            }
        }

        outcomes
    }

    /// Judges note `index` as a Miss with the given delta.
    ///
    /// Does nothing if the note is out of range or already judged.
    pub fn mark_miss(&mut self, index: usize, diff_ms: f64) -> Option<JudgementOutcome> {
        if self.is_ended() || !self.schedule.try_judge(index) {
            return None;
        }
        let outcome = self.judging.apply(index, Judgement::Miss, diff_ms);
        self.advance_head();
        Some(outcome)
    }

    /// Clears every judged flag and the judging totals.
    pub fn reset_judging(&mut self) {
        if self.is_ended() {
            return;
        }
        self.schedule.reset();
        self.judging.reset();
        self.head_index = 0;
        self.clock.reset();
        log::info!("SESSION: Judging reset ({} notes)", self.schedule.len());
    }
}
