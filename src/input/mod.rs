//! Key events and their resolution to note categories.

pub mod bindings;
pub mod events;

pub use bindings::KeyBindings;
pub use events::{KeyEvent, KeyState};
