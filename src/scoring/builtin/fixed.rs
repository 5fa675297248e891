//! Score value sum normalised to 1,000,000.

use crate::scoring::{ScoreContext, ScoringStrategy};

const MAX_SCORE: f64 = 1_000_000.0;

/// `round(1_000_000 * base_score / (note_count * max_score_value))`.
#[derive(Debug, Clone, Default)]
pub struct FixedScoring;

impl FixedScoring {
    pub const ID: &'static str = "fixed";

    pub fn new() -> Self {
        Self
    }
}

impl ScoringStrategy for FixedScoring {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Fixed"
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> u32 {
        let max_base = ctx.note_count as f64 * ctx.max_score_value;
        if max_base <= 0.0 {
            return 0;
        }
        (MAX_SCORE * ctx.base_score / max_base).round().max(0.0) as u32
    }
}
