//! Read-only view of a session's judging state.

use super::{JudgeSession, LastJudgement};
use crate::models::stats::JudgementCounts;
use crate::state::traits::Snapshot;
use serde::Serialize;

/// Judging totals at one instant, for display and reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgingSnapshot {
    /// Smoothed clock position (ms).
    pub now_ms: f64,
    /// Throttled running time for display (ms).
    pub display_time_ms: f64,
    pub counts: JudgementCounts,
    pub combo: u32,
    pub highest_combo: u32,
    pub life: f64,
    pub score: u32,
    /// Weighted accuracy in `[0, 100]`.
    pub accuracy: f64,
    pub last_judgement: Option<LastJudgement>,
    pub total_notes: usize,
    pub judged_notes: usize,
    pub remaining_notes: usize,
    /// Share of notes judged, in percent. 100 for an empty map.
    pub completion_percent: f64,
    pub life_depleted: bool,
    pub finished: bool,
    pub ended: bool,
}

impl Snapshot for JudgeSession {
    type Output = JudgingSnapshot;

    fn create_snapshot(&self) -> JudgingSnapshot {
        let total_notes = self.schedule.len();
        let judged_notes = self.schedule.judged_count();
        let completion_percent = if total_notes == 0 {
            100.0
        } else {
            judged_notes as f64 / total_notes as f64 * 100.0
        };

        JudgingSnapshot {
            now_ms: self.clock.now(),
            display_time_ms: self.display_clock.shown_ms(),
            counts: *self.judging.counts(),
            combo: self.judging.combo(),
            highest_combo: self.judging.highest_combo(),
            life: self.judging.life(),
            score: self.judging.score(),
            accuracy: self.judging.display_accuracy(),
            last_judgement: self.judging.last_judgement(),
            total_notes,
            judged_notes,
            remaining_notes: total_notes - judged_notes,
            completion_percent,
            life_depleted: self.judging.is_life_depleted(),
            finished: self.is_finished(),
            ended: self.is_ended(),
        }
    }
}

impl JudgeSession {
    /// Creates a snapshot of the current judging state.
    pub fn snapshot(&self) -> JudgingSnapshot {
        self.create_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::mania_session;

    #[test]
    fn test_snapshot_progress() {
        let mut session = mania_session(&[(0, 1000.0), (1, 2000.0), (2, 3000.0), (3, 4000.0)]);
        let snap = session.snapshot();
        assert_eq!(snap.accuracy, 100.0);
        assert_eq!(snap.completion_percent, 0.0);
        assert_eq!(snap.remaining_notes, 4);

        session.judge_hit(0, 1000.0).unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.judged_notes, 1);
        assert_eq!(snap.remaining_notes, 3);
        assert_eq!(snap.completion_percent, 25.0);
        assert_eq!(snap.combo, 1);
        assert!(!snap.finished);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = mania_session(&[(0, 1000.0)]);
        session.judge_hit(0, 1000.0).unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["counts"]["marvelous"], 1);
        assert_eq!(json["last_judgement"]["judgement"], "Marvelous");
        assert_eq!(json["finished"], true);
    }

    #[test]
    fn test_empty_map_is_complete() {
        let session = mania_session(&[]);
        let snap = session.snapshot();
        assert_eq!(snap.completion_percent, 100.0);
        assert!(snap.finished);
    }
}
