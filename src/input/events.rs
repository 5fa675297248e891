//! Raw key events as delivered to the frame driver.

use serde::{Deserialize, Serialize};

/// Whether a key went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A key transition, identified by key name ("d", "space", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: KeyState::Pressed,
        }
    }

    pub fn up(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: KeyState::Released,
        }
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Pressed
    }
}
