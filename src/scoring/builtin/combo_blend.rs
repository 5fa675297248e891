//! Half combo, half accuracy scoring out of 1,000,000.

use crate::scoring::{ScoreContext, ScoringStrategy};

const COMBO_SHARE: f64 = 500_000.0;
const ACCURACY_SHARE: f64 = 500_000.0;

/// Blends combo progress and accuracy progress, both weighted by accuracy.
///
/// `score = round(500000 * acc * combo_progress + 500000 * acc^5 * accuracy_progress)`
/// where `acc` is the clamped weighted accuracy in `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct ComboBlendScoring;

impl ComboBlendScoring {
    pub const ID: &'static str = "combo_blend";

    pub fn new() -> Self {
        Self
    }
}

impl ScoringStrategy for ComboBlendScoring {
    fn id(&self) -> &str {
        Self::ID
    }

    fn display_name(&self) -> &str {
        "Combo Blend"
    }

    fn score(&self, ctx: &ScoreContext<'_>) -> u32 {
        let accuracy = ctx.counts.display_accuracy(ctx.accuracy_weights) / 100.0;

        let combo_progress = if ctx.max_combo_portion > 0.0 {
            ctx.combo_portion / ctx.max_combo_portion
        } else {
            1.0
        };
        let accuracy_progress = if ctx.note_count > 0 {
            ctx.judgement_count() as f64 / ctx.note_count as f64
        } else {
            1.0
        };

        let score = COMBO_SHARE * accuracy * combo_progress
            + ACCURACY_SHARE * accuracy.powi(5) * accuracy_progress;
        score.round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::{Judgement, JudgementCounts, JudgementTable};
    use crate::scoring::max_combo_portion;

    #[test]
    fn test_full_combo_all_marvelous_is_max() {
        let weights = JudgementTable::default_accuracy_weights();
        let mut counts = JudgementCounts::new();
        let mut combo_portion = 0.0;
        for combo in 1..=10 {
            counts.increment(Judgement::Marvelous);
            combo_portion += 320.0 * (combo as f64).sqrt();
        }

        let ctx = ScoreContext {
            counts: &counts,
            accuracy_weights: &weights,
            note_count: 10,
            max_score_value: 320.0,
            combo_portion,
            max_combo_portion: max_combo_portion(10, 320.0),
            base_score: 3200.0,
        };
        assert_eq!(ComboBlendScoring.score(&ctx), 1_000_000);
    }

    #[test]
    fn test_only_misses_score_zero() {
        let weights = JudgementTable::default_accuracy_weights();
        let mut counts = JudgementCounts::new();
        counts.increment(Judgement::Miss);
        counts.increment(Judgement::Miss);

        let ctx = ScoreContext {
            counts: &counts,
            accuracy_weights: &weights,
            note_count: 2,
            max_score_value: 320.0,
            combo_portion: 0.0,
            max_combo_portion: max_combo_portion(2, 320.0),
            base_score: 0.0,
        };
        assert_eq!(ComboBlendScoring.score(&ctx), 0);
    }

    #[test]
    fn test_empty_map_uses_full_progress() {
        let weights = JudgementTable::default_accuracy_weights();
        let counts = JudgementCounts::new();
        let ctx = ScoreContext {
            counts: &counts,
            accuracy_weights: &weights,
            note_count: 0,
            max_score_value: 320.0,
            combo_portion: 0.0,
            max_combo_portion: 0.0,
            base_score: 0.0,
        };
        assert_eq!(ComboBlendScoring.score(&ctx), 1_000_000);
    }

    #[test]
    fn test_half_way_through() {
        let weights = JudgementTable::default_accuracy_weights();
        let mut counts = JudgementCounts::new();
        counts.increment(Judgement::Marvelous);

        let ctx = ScoreContext {
            counts: &counts,
            accuracy_weights: &weights,
            note_count: 2,
            max_score_value: 100.0,
            combo_portion: 100.0,
            max_combo_portion: max_combo_portion(2, 100.0),
            base_score: 100.0,
        };
        let expected = (500_000.0 * 100.0 / (100.0 + 100.0 * 2f64.sqrt()) + 250_000.0).round();
        assert_eq!(ComboBlendScoring.score(&ctx), expected as u32);
    }
}
