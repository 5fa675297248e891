//! Key name to input target resolution.

use crate::models::engine::{DrumCategory, InputMode, InputTarget};
use crate::models::settings::JudgeSettings;
use std::collections::HashMap;

/// Maps key names to the input category they strike.
///
/// Key names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    bindings: HashMap<String, InputTarget>,
    /// First bound key per target, in configuration order.
    primary: HashMap<InputTarget, String>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the bindings for a play mode from settings.
    pub fn for_mode(settings: &JudgeSettings, mode: InputMode) -> Self {
        let mut bindings = Self::new();
        match mode {
            InputMode::Mania { key_count } => match settings.lane_keys(key_count) {
                Some(keys) => {
                    if keys.len() != key_count as usize {
                        log::warn!(
                            "CONFIG: {} keys bound for {}K, expected {}",
                            keys.len(),
                            key_count,
                            key_count
                        );
                    }
                    for (lane, key) in keys.iter().take(key_count as usize).enumerate() {
                        bindings.bind(key, InputTarget::Lane(lane));
                    }
                }
                None => log::warn!("CONFIG: No keybinds configured for {}K", key_count),
            },
            InputMode::Taiko => {
                for key in &settings.taiko_keybinds.center {
                    bindings.bind(key, InputTarget::Drum(DrumCategory::Center));
                }
                for key in &settings.taiko_keybinds.rim {
                    bindings.bind(key, InputTarget::Drum(DrumCategory::Rim));
                }
            }
        }
        bindings
    }

    /// Binds `key` to `target`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: &str, target: InputTarget) {
        let key = key.to_lowercase();
        self.primary.entry(target).or_insert_with(|| key.clone());
        if let Some(previous) = self.bindings.insert(key.clone(), target) {
            if previous != target {
                log::warn!("CONFIG: Key '{}' rebound from {:?} to {:?}", key, previous, target);
            }
        }
    }

    pub fn resolve(&self, key: &str) -> Option<InputTarget> {
        self.bindings.get(&key.to_lowercase()).copied()
    }

    /// A key that strikes `target`, if any is bound.
    pub fn key_for(&self, target: InputTarget) -> Option<&str> {
        self.primary.get(&target).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mania_bindings() {
        let settings = JudgeSettings::default();
        let bindings = KeyBindings::for_mode(&settings, InputMode::Mania { key_count: 4 });
        assert_eq!(bindings.resolve("d"), Some(InputTarget::Lane(0)));
        assert_eq!(bindings.resolve("K"), Some(InputTarget::Lane(3)));
        assert_eq!(bindings.resolve("q"), None);
        assert_eq!(bindings.key_for(InputTarget::Lane(2)), Some("j"));
    }

    #[test]
    fn test_taiko_bindings() {
        let settings = JudgeSettings::default();
        let bindings = KeyBindings::for_mode(&settings, InputMode::Taiko);
        assert_eq!(bindings.resolve("f"), Some(InputTarget::Drum(DrumCategory::Center)));
        assert_eq!(bindings.resolve("j"), Some(InputTarget::Drum(DrumCategory::Center)));
        assert_eq!(bindings.resolve("d"), Some(InputTarget::Drum(DrumCategory::Rim)));
        assert_eq!(bindings.key_for(InputTarget::Drum(DrumCategory::Rim)), Some("d"));
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_unconfigured_key_count_is_empty() {
        let settings = JudgeSettings::default();
        let bindings = KeyBindings::for_mode(&settings, InputMode::Mania { key_count: 9 });
        assert!(bindings.is_empty());
    }
}
