//! Trait definition for scoring strategies.

use crate::models::stats::{AccuracyWeights, JudgementCounts};
use std::fmt::Debug;

/// Running totals a strategy scores from.
///
/// Everything here is maintained by the judging state; strategies never keep
/// state of their own.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    /// Judgement counts, including the judgement just applied.
    pub counts: &'a JudgementCounts,
    pub accuracy_weights: &'a AccuracyWeights,
    /// Number of notes in the map.
    pub note_count: usize,
    /// Largest per-tier score value (floored at 0).
    pub max_score_value: f64,
    /// Sum of `max_score_value * sqrt(combo)` over every judgement so far.
    pub combo_portion: f64,
    /// `combo_portion` for a full combo over `note_count` notes.
    pub max_combo_portion: f64,
    /// Sum of the score values of every judgement so far.
    pub base_score: f64,
}

impl ScoreContext<'_> {
    /// Number of judgements applied so far.
    pub fn judgement_count(&self) -> u32 {
        self.counts.total()
    }
}

/// Trait that all scoring strategies must implement.
pub trait ScoringStrategy: Send + Sync + Debug {
    /// Unique identifier used in configuration (e.g. "combo_blend").
    fn id(&self) -> &str;

    /// Human-readable display name.
    fn display_name(&self) -> &str;

    /// Score for the current totals.
    fn score(&self, ctx: &ScoreContext<'_>) -> u32;
}

/// `sum_{i=1..note_count} max_score_value * sqrt(i)`.
pub fn max_combo_portion(note_count: usize, max_score_value: f64) -> f64 {
    (1..=note_count)
        .map(|i| max_score_value * (i as f64).sqrt())
        .sum()
}
