//! Combo, life and score accumulation.
//!
//! `JudgingState` consumes one judgement at a time. It does not know about
//! notes or timing; the session decides what gets judged and hands the result
//! here exactly once per note.

use crate::models::stats::{
    AccuracyWeights, Judgement, JudgementCounts, JudgementTable, LifeDeltas, ScoreValues,
};
use crate::scoring::{ScoreContext, ScoringStrategy, max_combo_portion};
use serde::Serialize;
use std::sync::Arc;

/// Life at the start of a session, and its upper bound.
pub const MAX_LIFE: f64 = 100.0;

/// The most recent judgement and its signed timing delta (note time - hit time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LastJudgement {
    pub judgement: Judgement,
    pub diff_ms: f64,
}

/// A single note judgement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JudgementEvent {
    /// Index of the note in the schedule.
    pub index: usize,
    pub judgement: Judgement,
    /// Signed delta, positive when struck early, negative when late or expired.
    pub diff_ms: f64,
}

/// What applying one judgement did to the running state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JudgementOutcome {
    pub event: JudgementEvent,
    pub combo: u32,
    pub life: f64,
    pub score: u32,
    /// `true` only for the judgement that first brought life to 0.
    pub life_depleted: bool,
}

/// Per-tier tables a judging state is configured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgementTables {
    pub score_values: ScoreValues,
    pub accuracy: AccuracyWeights,
    pub life: LifeDeltas,
}

impl Default for JudgementTables {
    fn default() -> Self {
        Self {
            score_values: JudgementTable::default_score_values(),
            accuracy: JudgementTable::default_accuracy_weights(),
            life: JudgementTable::default_life_deltas(),
        }
    }
}

/// Running judgement totals for one session.
#[derive(Debug, Clone)]
pub struct JudgingState {
    counts: JudgementCounts,
    combo: u32,
    highest_combo: u32,
    life: f64,
    score: u32,
    last_judgement: Option<LastJudgement>,
    life_depleted: bool,

    combo_portion: f64,
    base_score: f64,

    note_count: usize,
    max_score_value: f64,
    max_combo_portion: f64,
    tables: JudgementTables,
    strategy: Arc<dyn ScoringStrategy>,
}

impl JudgingState {
    pub fn new(note_count: usize, tables: JudgementTables, strategy: Arc<dyn ScoringStrategy>) -> Self {
        let max_score_value = tables.score_values.max_value();
        Self {
            counts: JudgementCounts::new(),
            combo: 0,
            highest_combo: 0,
            life: MAX_LIFE,
            score: 0,
            last_judgement: None,
            life_depleted: false,
            combo_portion: 0.0,
            base_score: 0.0,
            note_count,
            max_score_value,
            max_combo_portion: max_combo_portion(note_count, max_score_value),
            tables,
            strategy,
        }
    }

    /// Applies one judgement: counts, combo, life, then score.
    pub fn apply(&mut self, index: usize, judgement: Judgement, diff_ms: f64) -> JudgementOutcome {
        self.counts.increment(judgement);

        if judgement.is_miss() {
            self.combo = 0;
        } else {
            self.combo += 1;
        }
        self.highest_combo = self.highest_combo.max(self.combo);

        let life_delta = self.tables.life.get(judgement);
        self.life = (self.life + life_delta).clamp(0.0, MAX_LIFE);
        let depleted_now = self.life <= 0.0 && !self.life_depleted;
        if depleted_now {
            self.life_depleted = true;
        }

        self.base_score += self.tables.score_values.get(judgement);
        self.combo_portion += self.max_score_value * (self.combo as f64).sqrt();
        self.score = self.strategy.score(&self.score_context());

        self.last_judgement = Some(LastJudgement { judgement, diff_ms });

        JudgementOutcome {
            event: JudgementEvent {
                index,
                judgement,
                diff_ms,
            },
            combo: self.combo,
            life: self.life,
            score: self.score,
            life_depleted: depleted_now,
        }
    }

    fn score_context(&self) -> ScoreContext<'_> {
        ScoreContext {
            counts: &self.counts,
            accuracy_weights: &self.tables.accuracy,
            note_count: self.note_count,
            max_score_value: self.max_score_value,
            combo_portion: self.combo_portion,
            max_combo_portion: self.max_combo_portion,
            base_score: self.base_score,
        }
    }

    /// Back to the start-of-session state.
    pub fn reset(&mut self) {
        self.counts = JudgementCounts::new();
        self.combo = 0;
        self.highest_combo = 0;
        self.life = MAX_LIFE;
        self.score = 0;
        self.last_judgement = None;
        self.life_depleted = false;
        self.combo_portion = 0.0;
        self.base_score = 0.0;
    }

    pub fn counts(&self) -> &JudgementCounts {
        &self.counts
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn highest_combo(&self) -> u32 {
        self.highest_combo
    }

    pub fn life(&self) -> f64 {
        self.life
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn last_judgement(&self) -> Option<LastJudgement> {
        self.last_judgement
    }

    pub fn is_life_depleted(&self) -> bool {
        self.life_depleted
    }

    /// Weighted accuracy clamped to `[0, 100]`; 100 before any judgement.
    pub fn display_accuracy(&self) -> f64 {
        self.counts.display_accuracy(&self.tables.accuracy)
    }

    pub fn strategy(&self) -> &Arc<dyn ScoringStrategy> {
        &self.strategy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ComboBlendScoring, FixedScoring};

    fn state(note_count: usize) -> JudgingState {
        JudgingState::new(note_count, JudgementTables::default(), Arc::new(ComboBlendScoring))
    }

    #[test]
    fn test_combo_rules() {
        let mut s = state(10);
        s.apply(0, Judgement::Marvelous, 0.0);
        s.apply(1, Judgement::Okay, 0.0);
        s.apply(2, Judgement::Good, 0.0);
        assert_eq!(s.combo(), 3);
        s.apply(3, Judgement::Miss, -200.0);
        assert_eq!(s.combo(), 0);
        assert_eq!(s.highest_combo(), 3);
        s.apply(4, Judgement::Great, 0.0);
        assert_eq!(s.combo(), 1);
        assert_eq!(s.highest_combo(), 3);
    }

    #[test]
    fn test_life_clamps_at_max() {
        let mut s = state(10);
        s.apply(0, Judgement::Marvelous, 0.0);
        assert_eq!(s.life(), 100.0);
        s.apply(1, Judgement::Miss, -170.0);
        assert_eq!(s.life(), 98.0);
    }

    #[test]
    fn test_life_depleted_reported_once() {
        let tables = JudgementTables {
            life: JudgementTable::new(0.0, 0.0, 0.0, 0.0, 0.0, -60.0),
            ..JudgementTables::default()
        };
        let mut s = JudgingState::new(5, tables, Arc::new(ComboBlendScoring));
        assert!(!s.apply(0, Judgement::Miss, -200.0).life_depleted);
        let outcome = s.apply(1, Judgement::Miss, -200.0);
        assert!(outcome.life_depleted);
        assert_eq!(outcome.life, 0.0);
        assert!(!s.apply(2, Judgement::Miss, -200.0).life_depleted);
        assert!(s.is_life_depleted());

        s.reset();
        assert!(!s.is_life_depleted());
        assert_eq!(s.life(), MAX_LIFE);
    }

    #[test]
    fn test_score_uses_counts_after_increment() {
        let mut s = state(1);
        let outcome = s.apply(0, Judgement::Marvelous, 0.0);
        assert_eq!(outcome.score, 1_000_000);
        assert_eq!(s.display_accuracy(), 100.0);
    }

    #[test]
    fn test_single_miss_accuracy_is_zero() {
        let mut s = state(3);
        s.apply(0, Judgement::Miss, -180.0);
        assert_eq!(s.display_accuracy(), 0.0);
        assert_eq!(s.score(), 0);
        assert_eq!(
            s.last_judgement(),
            Some(LastJudgement {
                judgement: Judgement::Miss,
                diff_ms: -180.0
            })
        );
    }

    #[test]
    fn test_fixed_strategy() {
        let mut s = JudgingState::new(2, JudgementTables::default(), Arc::new(FixedScoring));
        s.apply(0, Judgement::Marvelous, 0.0);
        assert_eq!(s.score(), 500_000);
        s.apply(1, Judgement::Great, 0.0);
        assert_eq!(s.score(), 812_500);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut s = state(4);
        s.apply(0, Judgement::Perfect, 5.0);
        s.apply(1, Judgement::Miss, -200.0);
        s.reset();
        assert_eq!(s.counts().total(), 0);
        assert_eq!(s.score(), 0);
        assert_eq!(s.combo(), 0);
        assert_eq!(s.highest_combo(), 0);
        assert_eq!(s.last_judgement(), None);
        assert_eq!(s.display_accuracy(), 100.0);
    }
}
