//! Built-in scoring strategies.

mod combo_blend;
mod fixed;

pub use combo_blend::ComboBlendScoring;
pub use fixed::FixedScoring;
