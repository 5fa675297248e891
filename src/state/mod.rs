//! Session state.
//!
//! `JudgeSession` holds everything one play needs and is the only mutable
//! state in the crate.

pub mod game;
pub mod traits;

pub use game::{
    FrameReport, JudgeSession, JudgementEvent, JudgementOutcome, JudgingSnapshot, SessionStatus,
};
pub use traits::Snapshot;
