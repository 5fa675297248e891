//! Judgement settings loaded from TOML.
//!
//! The settings layer owns validation: numeric tables reaching the session are
//! finite and hit window profiles are non-decreasing. A missing or unknown
//! profile name is not an error here; the session degrades instead.

use crate::models::engine::HitWindow;
use crate::models::stats::{AccuracyWeights, JudgementTable, LifeDeltas, ScoreValues};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised while loading or saving settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Keys for the two drum categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaikoKeybinds {
    pub center: Vec<String>,
    pub rim: Vec<String>,
}

impl Default for TaikoKeybinds {
    fn default() -> Self {
        Self {
            center: vec!["f".to_string(), "j".to_string()],
            rim: vec!["d".to_string(), "k".to_string()],
        }
    }
}

/// Everything the judgement core reads from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeSettings {
    /// Name of the active profile in `judgement_windows`.
    pub judgement: String,
    /// Scoring strategy id (`combo_blend` or `fixed`).
    pub scoring: String,
    /// How far behind "now" notes stay relevant (ms).
    pub visible_past_ms: f64,
    /// How far ahead of "now" notes become relevant (ms).
    pub visible_future_ms: f64,
    /// Minimum interval between refreshes of the displayed clock (ms).
    pub display_refresh_ms: f64,
    /// Target frames per second of the frame driver.
    pub frame_rate: u32,
    /// Whether the driver stops the session when life reaches 0.
    pub end_on_fail: bool,
    pub judgement_windows: BTreeMap<String, HitWindow>,
    pub score_values: ScoreValues,
    pub accuracy: AccuracyWeights,
    pub life: LifeDeltas,
    /// Lane keys per key count ("4" => ["d", "f", "j", "k"]).
    pub keybinds: HashMap<String, Vec<String>>,
    pub taiko_keybinds: TaikoKeybinds,
}

impl Default for JudgeSettings {
    fn default() -> Self {
        let mut judgement_windows = BTreeMap::new();
        judgement_windows.insert("Standard".to_string(), HitWindow::new());
        judgement_windows.insert("OsuOD8".to_string(), HitWindow::from_osu_od(8.0));
        judgement_windows.insert("EtternaJ4".to_string(), HitWindow::from_etterna_judge(4));

        Self {
            judgement: "Standard".to_string(),
            scoring: "combo_blend".to_string(),
            visible_past_ms: 200.0,
            visible_future_ms: 4000.0,
            display_refresh_ms: 100.0,
            frame_rate: 240,
            end_on_fail: true,
            judgement_windows,
            score_values: JudgementTable::default_score_values(),
            accuracy: JudgementTable::default_accuracy_weights(),
            life: JudgementTable::default_life_deltas(),
            keybinds: default_keybinds(),
            taiko_keybinds: TaikoKeybinds::default(),
        }
    }
}

fn default_keybinds() -> HashMap<String, Vec<String>> {
    let keys = |list: &[&str]| list.iter().map(|k| k.to_string()).collect::<Vec<_>>();
    let mut map = HashMap::new();
    map.insert("4".to_string(), keys(&["d", "f", "j", "k"]));
    map.insert("5".to_string(), keys(&["d", "f", "space", "j", "k"]));
    map.insert("6".to_string(), keys(&["s", "d", "f", "j", "k", "l"]));
    map.insert("7".to_string(), keys(&["s", "d", "f", "space", "j", "k", "l"]));
    map
}

impl JudgeSettings {
    /// Loads and validates settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        log::info!("CONFIG: Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Loads settings, falling back to defaults when the file is missing or bad.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("CONFIG: {} not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::error!("CONFIG: {}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes the settings as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks the numeric sanity the session relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, window) in &self.judgement_windows {
            if !window.is_well_formed() {
                return Err(ConfigError::Invalid(format!(
                    "judgement window '{}' must be finite and non-decreasing",
                    name
                )));
            }
        }

        let tables = [
            ("score_values", &self.score_values),
            ("accuracy", &self.accuracy),
            ("life", &self.life),
        ];
        for (name, table) in tables {
            if !table.is_finite() {
                return Err(ConfigError::Invalid(format!("{} contains a non-finite value", name)));
            }
        }

        if !(self.visible_past_ms >= 0.0 && self.visible_future_ms >= 0.0) {
            return Err(ConfigError::Invalid(
                "visibility windows must be non-negative".to_string(),
            ));
        }
        if !(self.display_refresh_ms > 0.0) {
            return Err(ConfigError::Invalid(
                "display_refresh_ms must be positive".to_string(),
            ));
        }
        if self.frame_rate == 0 {
            return Err(ConfigError::Invalid("frame_rate must be positive".to_string()));
        }
        Ok(())
    }

    /// The hit window of the active profile, if one is configured.
    pub fn active_window(&self) -> Option<HitWindow> {
        let window = self.judgement_windows.get(&self.judgement).copied();
        if window.is_none() {
            log::warn!(
                "CONFIG: No judgement window named '{}'; input will not be judged",
                self.judgement
            );
        }
        window
    }

    /// Lane keys for a key count, if configured.
    pub fn lane_keys(&self, key_count: u8) -> Option<&[String]> {
        self.keybinds.get(&key_count.to_string()).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::stats::Judgement;

    #[test]
    fn test_defaults_validate() {
        let settings = JudgeSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.active_window(), Some(HitWindow::new()));
        assert_eq!(settings.lane_keys(4).map(|k| k.len()), Some(4));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings = JudgeSettings::from_toml_str(
            r#"
judgement = "Strict"
scoring = "fixed"

[judgement_windows.Strict]
Marvelous = 10.0
Perfect = 20.0
Great = 30.0
Good = 40.0
Okay = 50.0
Miss = 60.0
"#,
        )
        .unwrap();

        assert_eq!(settings.scoring, "fixed");
        assert_eq!(settings.visible_future_ms, 4000.0);
        let window = settings.active_window().unwrap();
        assert_eq!(window.miss_ms, 60.0);
        assert_eq!(settings.life.get(Judgement::Miss), -2.0);
    }

    #[test]
    fn test_rejects_decreasing_window() {
        let err = JudgeSettings::from_toml_str(
            r#"
[judgement_windows.Broken]
Marvelous = 50.0
Perfect = 20.0
Great = 30.0
Good = 40.0
Okay = 50.0
Miss = 60.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_profile_is_none() {
        let settings = JudgeSettings {
            judgement: "Nope".to_string(),
            ..JudgeSettings::default()
        };
        assert!(settings.validate().is_ok());
        assert_eq!(settings.active_window(), None);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let settings = JudgeSettings::default();
        let text = toml::to_string_pretty(&settings).unwrap();
        let parsed = JudgeSettings::from_toml_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = JudgeSettings::load_or_default(Path::new("no/such/settings.toml"));
        assert_eq!(settings, JudgeSettings::default());
    }
}
