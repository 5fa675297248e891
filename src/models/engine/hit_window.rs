//! Definitions and constructors for hit window timing thresholds.

use crate::models::stats::Judgement;
use serde::{Deserialize, Serialize};

/// Maximum timing delta (ms) accepted by each judgement tier.
///
/// Thresholds are expected to be non-decreasing from `marvelous_ms` to
/// `miss_ms`. `miss_ms` is the absolute cutoff: inputs further away than that
/// do not match any note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitWindow {
    #[serde(rename = "Marvelous")]
    pub marvelous_ms: f64,
    #[serde(rename = "Perfect")]
    pub perfect_ms: f64,
    #[serde(rename = "Great")]
    pub great_ms: f64,
    #[serde(rename = "Good")]
    pub good_ms: f64,
    #[serde(rename = "Okay")]
    pub okay_ms: f64,
    #[serde(rename = "Miss")]
    pub miss_ms: f64,
}

impl HitWindow {
    /// The "Standard" profile.
    pub fn new() -> Self {
        Self {
            marvelous_ms: 18.0,
            perfect_ms: 43.0,
            great_ms: 76.0,
            good_ms: 106.0,
            okay_ms: 127.0,
            miss_ms: 164.0,
        }
    }

    /// Creates a window based on osu! Overall Difficulty.
    pub fn from_osu_od(od: f64) -> Self {
        let od = od.clamp(0.0, 10.0);
        Self {
            marvelous_ms: 16.0,            // Fixed (legacy behavior)
            perfect_ms: 64.0 - (3.0 * od), // 300 window
            great_ms: 97.0 - (3.0 * od),   // 100 window
            good_ms: 127.0 - (3.0 * od),   // 50 window
            okay_ms: 151.0 - (3.0 * od),
            miss_ms: 188.0 - (3.0 * od),
        }
    }

    /// Creates a window based on the Etterna judge level (J4 = standard).
    pub fn from_etterna_judge(judge_level: u8) -> Self {
        let judge_level = judge_level.clamp(1, 9);
        let scale = if judge_level == 9 {
            0.2
        } else {
            1.0 - ((judge_level as f64 - 4.0) / 6.0)
        };

        // Etterna rule: the last hittable tier never drops below 180ms.
        let okay = (180.0 * scale).max(180.0);

        Self {
            marvelous_ms: 22.5 * scale,
            perfect_ms: 45.0 * scale,
            great_ms: 90.0 * scale,
            good_ms: 135.0 * scale,
            okay_ms: okay,
            miss_ms: 500.0,
        }
    }

    /// Utility constructor for fully custom values.
    pub fn from_custom(marvelous: f64, perfect: f64, great: f64, good: f64, okay: f64, miss: f64) -> Self {
        Self {
            marvelous_ms: marvelous,
            perfect_ms: perfect,
            great_ms: great,
            good_ms: good,
            okay_ms: okay,
            miss_ms: miss,
        }
    }

    /// Threshold for a single tier.
    pub fn threshold(&self, judgement: Judgement) -> f64 {
        match judgement {
            Judgement::Marvelous => self.marvelous_ms,
            Judgement::Perfect => self.perfect_ms,
            Judgement::Great => self.great_ms,
            Judgement::Good => self.good_ms,
            Judgement::Okay => self.okay_ms,
            Judgement::Miss => self.miss_ms,
        }
    }

    /// A window with a non-positive (or NaN) Miss cutoff matches nothing.
    pub fn is_usable(&self) -> bool {
        self.miss_ms > 0.0
    }

    /// Returns `true` if every threshold is finite and they never decrease.
    pub fn is_well_formed(&self) -> bool {
        Judgement::ALL.iter().all(|&j| self.threshold(j).is_finite())
            && Judgement::ALL
                .windows(2)
                .all(|pair| self.threshold(pair[0]) <= self.threshold(pair[1]))
    }

    /// Maps an absolute timing delta to the first tier whose threshold covers it.
    ///
    /// Deltas past `okay_ms` are a Miss, including deltas past the cutoff;
    /// callers that need the cutoff use [`HitWindow::judge`].
    pub fn classify(&self, abs_delta_ms: f64) -> Judgement {
        Judgement::ALL
            .into_iter()
            .find(|&j| abs_delta_ms <= self.threshold(j))
            .unwrap_or(Judgement::Miss)
    }

    /// Judges a signed timing delta, or `None` if it lies beyond the Miss cutoff.
    pub fn judge(&self, timing_diff_ms: f64) -> Option<Judgement> {
        let abs_diff = timing_diff_ms.abs();
        if abs_diff > self.miss_ms {
            return None;
        }
        Some(self.classify(abs_diff))
    }
}

impl Default for HitWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_standard_profile() {
        let window = HitWindow::new();
        assert_eq!(window.classify(10.0), Judgement::Marvelous);
        assert_eq!(window.classify(18.0), Judgement::Marvelous);
        assert_eq!(window.classify(18.5), Judgement::Perfect);
        assert_eq!(window.classify(50.0), Judgement::Great);
        assert_eq!(window.classify(100.0), Judgement::Good);
        assert_eq!(window.classify(127.0), Judgement::Okay);
        assert_eq!(window.classify(150.0), Judgement::Miss);
    }

    #[test]
    fn test_judge_respects_cutoff() {
        let window = HitWindow::new();
        assert_eq!(window.judge(-10.0), Some(Judgement::Marvelous));
        assert_eq!(window.judge(164.0), Some(Judgement::Miss));
        assert_eq!(window.judge(-200.0), None);
    }

    #[test]
    fn test_builtin_profiles_are_well_formed() {
        assert!(HitWindow::new().is_well_formed());
        for od in 0..=10 {
            assert!(HitWindow::from_osu_od(od as f64).is_well_formed());
        }
        for judge in 1..=9 {
            assert!(HitWindow::from_etterna_judge(judge).is_well_formed());
        }
    }

    #[test]
    fn test_decreasing_profile_is_rejected() {
        let window = HitWindow::from_custom(50.0, 40.0, 76.0, 106.0, 127.0, 164.0);
        assert!(!window.is_well_formed());
    }

    #[test]
    fn test_usable() {
        assert!(HitWindow::new().is_usable());
        assert!(!HitWindow::from_custom(0.0, 0.0, 0.0, 0.0, 0.0, 0.0).is_usable());
    }
}
