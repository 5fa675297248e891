//! Score formulas.
//!
//! The judging state tracks the running totals; a [`ScoringStrategy`] turns them
//! into the displayed score. Strategies are looked up by id in a
//! [`ScoringRegistry`], which is how configuration selects one.

pub mod builtin;
pub mod calculator;
pub mod registry;

pub use builtin::{ComboBlendScoring, FixedScoring};
pub use calculator::{ScoreContext, ScoringStrategy, max_combo_portion};
pub use registry::ScoringRegistry;
