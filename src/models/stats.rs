//! Judgement tiers, per-tier tables and accumulated judgement counts.
//!
//! This module defines the judgement system used for scoring,
//! including weighted accuracy calculation and count tracking.

use serde::{Deserialize, Serialize};

/// Judgement tiers from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgement {
    /// Best timing.
    Marvelous,
    /// Excellent timing.
    Perfect,
    /// Good timing.
    Great,
    /// Acceptable timing.
    Good,
    /// Poor timing.
    Okay,
    /// Missed note (struck far off, or expired unjudged).
    Miss,
}

impl Judgement {
    /// Every tier, in ascending threshold order.
    pub const ALL: [Judgement; 6] = [
        Judgement::Marvelous,
        Judgement::Perfect,
        Judgement::Great,
        Judgement::Good,
        Judgement::Okay,
        Judgement::Miss,
    ];

    /// Display name, matching the keys used in configuration tables.
    pub fn name(self) -> &'static str {
        match self {
            Judgement::Marvelous => "Marvelous",
            Judgement::Perfect => "Perfect",
            Judgement::Great => "Great",
            Judgement::Good => "Good",
            Judgement::Okay => "Okay",
            Judgement::Miss => "Miss",
        }
    }

    pub fn is_miss(self) -> bool {
        self == Judgement::Miss
    }
}

impl std::fmt::Display for Judgement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One numeric value per judgement tier.
///
/// Used for score values, accuracy weights and life deltas. Serialized with the
/// tier names as keys (`Marvelous = 2.5`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JudgementTable {
    pub marvelous: f64,
    pub perfect: f64,
    pub great: f64,
    pub good: f64,
    pub okay: f64,
    pub miss: f64,
}

/// Points awarded per tier.
pub type ScoreValues = JudgementTable;
/// Accuracy percentage contributed by each tier (may be negative).
pub type AccuracyWeights = JudgementTable;
/// Life change applied by each tier.
pub type LifeDeltas = JudgementTable;

impl JudgementTable {
    pub fn new(marvelous: f64, perfect: f64, great: f64, good: f64, okay: f64, miss: f64) -> Self {
        Self {
            marvelous,
            perfect,
            great,
            good,
            okay,
            miss,
        }
    }

    /// Default score values (osu!mania-like 320/300/200/100/50/0).
    pub fn default_score_values() -> Self {
        Self::new(320.0, 300.0, 200.0, 100.0, 50.0, 0.0)
    }

    /// Default accuracy weights, in percent.
    pub fn default_accuracy_weights() -> Self {
        Self::new(100.0, 98.0, 65.0, 25.0, -50.0, -100.0)
    }

    /// Default life deltas.
    pub fn default_life_deltas() -> Self {
        Self::new(2.5, 2.0, 1.0, 0.0, -1.0, -2.0)
    }

    pub fn get(&self, judgement: Judgement) -> f64 {
        match judgement {
            Judgement::Marvelous => self.marvelous,
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Good => self.good,
            Judgement::Okay => self.okay,
            Judgement::Miss => self.miss,
        }
    }

    /// Largest value in the table, floored at 0.
    pub fn max_value(&self) -> f64 {
        Judgement::ALL
            .iter()
            .map(|&j| self.get(j))
            .fold(0.0, f64::max)
    }

    /// Returns `true` if every entry is a finite number.
    pub fn is_finite(&self) -> bool {
        Judgement::ALL.iter().all(|&j| self.get(j).is_finite())
    }
}

/// Accumulated judgement counts for a play session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgementCounts {
    pub marvelous: u32,
    pub perfect: u32,
    pub great: u32,
    pub good: u32,
    pub okay: u32,
    pub miss: u32,
}

impl JudgementCounts {
    /// Creates empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, judgement: Judgement) -> u32 {
        match judgement {
            Judgement::Marvelous => self.marvelous,
            Judgement::Perfect => self.perfect,
            Judgement::Great => self.great,
            Judgement::Good => self.good,
            Judgement::Okay => self.okay,
            Judgement::Miss => self.miss,
        }
    }

    pub fn increment(&mut self, judgement: Judgement) {
        match judgement {
            Judgement::Marvelous => self.marvelous += 1,
            Judgement::Perfect => self.perfect += 1,
            Judgement::Great => self.great += 1,
            Judgement::Good => self.good += 1,
            Judgement::Okay => self.okay += 1,
            Judgement::Miss => self.miss += 1,
        }
    }

    /// Total number of judgements made.
    pub fn total(&self) -> u32 {
        Judgement::ALL.iter().map(|&j| self.get(j)).sum()
    }

    /// Weighted accuracy in percent, unclamped.
    ///
    /// Returns exactly 100 when nothing has been judged yet. With negative
    /// weights the result can drop below 0; callers clamp for display.
    pub fn weighted_accuracy(&self, weights: &AccuracyWeights) -> f64 {
        let total = self.total();
        if total == 0 {
            return 100.0;
        }

        let weighted_sum: f64 = Judgement::ALL
            .iter()
            .map(|&j| weights.get(j) * self.get(j) as f64)
            .sum();

        weighted_sum / total as f64
    }

    /// Weighted accuracy clamped to `[0, 100]`.
    pub fn display_accuracy(&self, weights: &AccuracyWeights) -> f64 {
        self.weighted_accuracy(weights).clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_accuracy_is_perfect() {
        let counts = JudgementCounts::new();
        let weights = JudgementTable::default_accuracy_weights();
        assert_eq!(counts.weighted_accuracy(&weights), 100.0);
        assert_eq!(counts.display_accuracy(&weights), 100.0);
    }

    #[test]
    fn test_single_miss_clamps_to_zero() {
        let mut counts = JudgementCounts::new();
        counts.increment(Judgement::Miss);
        let weights = JudgementTable::new(100.0, 98.0, 65.0, 25.0, -50.0, -100.0);
        assert_eq!(counts.weighted_accuracy(&weights), -100.0);
        assert_eq!(counts.display_accuracy(&weights), 0.0);
    }

    #[test]
    fn test_weighted_average() {
        let mut counts = JudgementCounts::new();
        counts.increment(Judgement::Marvelous);
        counts.increment(Judgement::Great);
        let weights = JudgementTable::new(100.0, 98.0, 60.0, 25.0, 0.0, 0.0);
        assert!((counts.weighted_accuracy(&weights) - 80.0).abs() < 1e-9);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_max_value_ignores_negatives() {
        let table = JudgementTable::new(-1.0, -2.0, -3.0, -4.0, -5.0, -6.0);
        assert_eq!(table.max_value(), 0.0);
        assert_eq!(JudgementTable::default_score_values().max_value(), 320.0);
    }

    #[test]
    fn test_table_toml_keys() {
        let table: JudgementTable = toml::from_str(
            "Marvelous = 1.0\nPerfect = 2.0\nGreat = 3.0\nGood = 4.0\nOkay = 5.0\nMiss = 6.0\n",
        )
        .unwrap();
        assert_eq!(table.get(Judgement::Okay), 5.0);
        assert_eq!(table.get(Judgement::Miss), 6.0);
    }
}
