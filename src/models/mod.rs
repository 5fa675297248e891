//! Plain data models: judgement tiers, hit windows, notes and settings.

pub mod engine;
pub mod settings;
pub mod stats;
