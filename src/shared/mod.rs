//! Data shared between the frame thread and its consumers.

pub mod snapshot;

pub use snapshot::{FrameView, VisibleNote};
