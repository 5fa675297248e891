pub mod hit_window;
pub mod note;
pub mod schedule;

pub use hit_window::HitWindow;
pub use note::{
    DrumCategory, HitObject, InputMode, InputTarget, LoadedMap, MapError, NoteClass, load_map,
};
pub use schedule::{NoteSchedule, ScheduleError};
