//! Cross-thread plumbing.

pub mod bus;

pub use bus::{SessionEvent, SystemBus, SystemEvent};
