//! Hit objects, note classification and .osu chart loading.

use rosu_map::section::general::GameMode;
use rosu_map::section::hit_objects::hit_samples::{
    HitSampleDefaultName, HitSampleInfo, HitSampleInfoName,
};
use rosu_map::section::hit_objects::{HitObject as OsuHitObject, HitObjectKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Width of the osu! playfield that mania x positions are expressed in.
pub const PLAYFIELD_WIDTH: f64 = 512.0;

/// Type flag of a plain circle / tap note.
pub const TYPE_CIRCLE: u8 = 1;
/// Type flag of a mania hold note.
pub const TYPE_HOLD: u8 = 128;

/// Hit sound bits that turn a taiko note into a rim (kat) strike.
pub const HIT_SOUND_WHISTLE: u8 = 2;
pub const HIT_SOUND_CLAP: u8 = 8;
const HIT_SOUND_FINISH: u8 = 4;

/// A note as supplied by the map loader. Never mutated during play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HitObject {
    /// Horizontal position on the 512-wide playfield (mania lane source).
    pub x: i32,
    pub y: i32,
    /// Time offset in the track, in milliseconds.
    pub time_ms: f64,
    /// Type/shape flags.
    pub kind: u8,
    /// Sound-category bitmask.
    pub hit_sound: u8,
    /// End of a sustained note, if any.
    pub end_time_ms: Option<f64>,
}

impl HitObject {
    /// Creates a tap note.
    pub fn tap(x: i32, time_ms: f64) -> Self {
        Self {
            x,
            y: 192,
            time_ms,
            kind: TYPE_CIRCLE,
            hit_sound: 0,
            end_time_ms: None,
        }
    }

    /// Creates a hold note.
    pub fn hold(x: i32, time_ms: f64, end_time_ms: f64) -> Self {
        Self {
            x,
            y: 192,
            time_ms,
            kind: TYPE_HOLD,
            hit_sound: 0,
            end_time_ms: Some(end_time_ms),
        }
    }

    /// Creates a taiko note of the given category.
    pub fn drum(time_ms: f64, category: DrumCategory) -> Self {
        let hit_sound = match category {
            DrumCategory::Center => 0,
            DrumCategory::Rim => HIT_SOUND_WHISTLE,
        };
        Self {
            x: 256,
            y: 192,
            time_ms,
            kind: TYPE_CIRCLE,
            hit_sound,
            end_time_ms: None,
        }
    }

    pub fn is_hold(&self) -> bool {
        self.kind & TYPE_HOLD != 0
    }

    /// Lane index for a `key_count`-lane playfield.
    ///
    /// Positions at or past the right edge land in the last lane.
    pub fn lane(&self, key_count: u8) -> usize {
        let key_count = key_count.max(1) as usize;
        let raw = (self.x as f64 * key_count as f64 / PLAYFIELD_WIDTH).floor();
        (raw.max(0.0) as usize).min(key_count - 1)
    }

    /// Drum category derived from the hit sound bits.
    pub fn drum_category(&self) -> DrumCategory {
        if self.hit_sound & (HIT_SOUND_WHISTLE | HIT_SOUND_CLAP) != 0 {
            DrumCategory::Rim
        } else {
            DrumCategory::Center
        }
    }
}

/// The two logical strike categories of two-button mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrumCategory {
    /// Don.
    Center,
    /// Kat.
    Rim,
}

/// How notes map to input categories for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Multi-lane mode with `key_count` lanes.
    Mania { key_count: u8 },
    /// Two-category drum mode.
    Taiko,
}

impl InputMode {
    /// Classifies a hit object under this mode.
    pub fn classify(&self, object: &HitObject) -> NoteClass {
        match *self {
            InputMode::Mania { key_count } => NoteClass::Lane(object.lane(key_count)),
            InputMode::Taiko => NoteClass::Drum(object.drum_category()),
        }
    }
}

/// Input category a note belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteClass {
    Lane(usize),
    Drum(DrumCategory),
}

/// Input category a key press resolves to.
pub type InputTarget = NoteClass;

/// Errors raised while loading a chart.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to load beatmap {path:?}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("unsupported game mode {0:?} (only mania and taiko are playable)")]
    UnsupportedMode(GameMode),
    #[error("invalid key count {0}")]
    InvalidKeyCount(f32),
}

/// A chart ready to build a session from.
#[derive(Clone, Debug)]
pub struct LoadedMap {
    pub audio_path: PathBuf,
    pub mode: InputMode,
    /// Hit objects sorted by time.
    pub hit_objects: Vec<HitObject>,
}

/// Loads a .osu file.
pub fn load_map(path: &Path) -> Result<LoadedMap, MapError> {
    let map = rosu_map::Beatmap::from_path(path).map_err(|e| MapError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let audio_path = path
        .parent()
        .map(|dir| dir.join(&map.audio_file))
        .unwrap_or_else(|| PathBuf::from(&map.audio_file));

    let mode = match map.mode {
        GameMode::Mania => {
            let key_count = map.circle_size.round();
            if !(1.0..=18.0).contains(&key_count) {
                return Err(MapError::InvalidKeyCount(map.circle_size));
            }
            InputMode::Mania {
                key_count: key_count as u8,
            }
        }
        GameMode::Taiko => InputMode::Taiko,
        other => return Err(MapError::UnsupportedMode(other)),
    };

    let mut hit_objects: Vec<HitObject> = map
        .hit_objects
        .iter()
        .filter_map(|h| convert_hit_object(h, mode))
        .collect();

    // .osu files are time-ordered in practice; a stable sort keeps file order for ties.
    hit_objects.sort_by(|a, b| a.time_ms.total_cmp(&b.time_ms));

    log::info!(
        "MAP: Loaded {:?} ({} notes, {:?})",
        path.file_name().unwrap_or_default(),
        hit_objects.len(),
        mode
    );

    Ok(LoadedMap {
        audio_path,
        mode,
        hit_objects,
    })
}

/// Converts an osu! hit object; sliders and spinners are not playable notes.
fn convert_hit_object(hit_object: &OsuHitObject, mode: InputMode) -> Option<HitObject> {
    let hit_sound = hit_sound_bits(&hit_object.samples);
    match &hit_object.kind {
        HitObjectKind::Circle(circle) => Some(HitObject {
            x: circle.pos.x as i32,
            y: circle.pos.y as i32,
            time_ms: hit_object.start_time,
            kind: TYPE_CIRCLE,
            hit_sound,
            end_time_ms: None,
        }),
        HitObjectKind::Hold(hold) if matches!(mode, InputMode::Mania { .. }) => Some(HitObject {
            x: hold.pos_x as i32,
            y: 192,
            time_ms: hit_object.start_time,
            kind: TYPE_HOLD,
            hit_sound,
            end_time_ms: Some(hit_object.start_time + hold.duration),
        }),
        _ => None,
    }
}

/// Rebuilds the .osu hit sound bitmask from parsed samples.
///
/// Only the whistle, finish and clap bits are recovered. The parser adds a
/// normal sample to every note, so the normal bit carries no information and
/// a plain note loads with a mask of 0.
fn hit_sound_bits(samples: &[HitSampleInfo]) -> u8 {
    samples.iter().fold(0, |bits, sample| match &sample.name {
        HitSampleInfoName::Default(HitSampleDefaultName::Whistle) => bits | HIT_SOUND_WHISTLE,
        HitSampleInfoName::Default(HitSampleDefaultName::Finish) => bits | HIT_SOUND_FINISH,
        HitSampleInfoName::Default(HitSampleDefaultName::Clap) => bits | HIT_SOUND_CLAP,
        _ => bits,
    })
}
