//! Judgement session for one play of one map.
//!
//! The `JudgeSession` owns everything a play needs:
//! - the smoothed playback clock and the throttled display clock
//! - the note schedule with its judged flags
//! - combo, life and score accumulation
//!
//! Every operation takes `&mut self` and completes synchronously, so a note's
//! judged flag and the totals it feeds are always updated together.

mod input;
mod judging;
mod notes;
mod snapshot;

pub use judging::{
    JudgementEvent, JudgementOutcome, JudgementTables, JudgingState, LastJudgement, MAX_LIFE,
};
pub use snapshot::JudgingSnapshot;

use crate::logic::clock::{ClockSmoother, DisplayClock};
use crate::models::engine::{HitObject, HitWindow, InputMode, LoadedMap, NoteSchedule, ScheduleError};
use crate::models::settings::JudgeSettings;
use crate::scoring::ScoringRegistry;
use std::ops::Range;

/// Whether the session still accepts judgements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Ended,
}

/// Result of one frame of clock advance and expiry sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Smoothed "now" used for this frame (ms).
    pub now_ms: f64,
    /// Visible note range at `now_ms`.
    pub visible: Range<usize>,
    /// Notes force-missed during this frame.
    pub misses: Vec<JudgementOutcome>,
}

impl FrameReport {
    pub fn life_depleted(&self) -> bool {
        self.misses.iter().any(|o| o.life_depleted)
    }
}

/// Session context for one play.
#[derive(Debug, Clone)]
pub struct JudgeSession {
    pub(crate) schedule: NoteSchedule,
    pub(crate) judging: JudgingState,
    pub(crate) clock: ClockSmoother,
    pub(crate) display_clock: DisplayClock,
    /// Active hit window; `None` when the configured profile does not exist.
    pub(crate) window: Option<HitWindow>,
    pub(crate) mode: InputMode,
    /// Index of the first note that may still be unjudged.
    pub(crate) head_index: usize,
    pub(crate) visible_past_ms: f64,
    pub(crate) visible_future_ms: f64,
    pub(crate) status: SessionStatus,
}

impl JudgeSession {
    /// Creates a session from time-ordered hit objects.
    pub fn new(
        objects: &[HitObject],
        mode: InputMode,
        settings: &JudgeSettings,
        registry: &ScoringRegistry,
    ) -> Result<Self, ScheduleError> {
        let schedule = NoteSchedule::from_hit_objects(objects, mode)?;
        let tables = JudgementTables {
            score_values: settings.score_values,
            accuracy: settings.accuracy,
            life: settings.life,
        };
        let strategy = registry.resolve(&settings.scoring);

        let window = settings.active_window();
        if window.is_some_and(|w| !w.is_usable()) {
            log::warn!(
                "SESSION: Judgement window '{}' has no Miss window; input will not be judged",
                settings.judgement
            );
        }

        log::info!(
            "SESSION: Started ({} notes, {:?}, window '{}', scoring '{}' ({}))",
            schedule.len(),
            mode,
            settings.judgement,
            strategy.id(),
            strategy.display_name()
        );

        Ok(Self {
            judging: JudgingState::new(schedule.len(), tables, strategy),
            schedule,
            clock: ClockSmoother::new(),
            display_clock: DisplayClock::new(settings.display_refresh_ms),
            window,
            mode,
            head_index: 0,
            visible_past_ms: settings.visible_past_ms,
            visible_future_ms: settings.visible_future_ms,
            status: SessionStatus::Running,
        })
    }

    /// Creates a session for a loaded map.
    pub fn from_map(
        map: &LoadedMap,
        settings: &JudgeSettings,
        registry: &ScoringRegistry,
    ) -> Result<Self, ScheduleError> {
        Self::new(&map.hit_objects, map.mode, settings, registry)
    }

    /// Runs one frame: advances the clock and expires notes that left the window.
    pub fn tick(&mut self, raw_position_ms: f64, frame_time_ms: f64, playing: bool) -> FrameReport {
        self.advance_clock(raw_position_ms, frame_time_ms, playing);
        self.finish_frame()
    }

    /// Advances the smoothed and display clocks, returning the new "now".
    ///
    /// Input for the frame should be judged after this and before
    /// [`JudgeSession::finish_frame`].
    pub fn advance_clock(&mut self, raw_position_ms: f64, frame_time_ms: f64, playing: bool) -> f64 {
        let now = self.clock.advance(raw_position_ms, frame_time_ms, playing);
        self.display_clock.update(now, frame_time_ms);
        now
    }

    /// Expires late notes at the current time and reports the visible range.
    pub fn finish_frame(&mut self) -> FrameReport {
        let now = self.clock.now();
        let misses = self.sweep_misses(now);

        FrameReport {
            now_ms: now,
            visible: self.visible_range(now),
            misses,
        }
    }

    /// Notes relevant at `now`: `[now - past, now + future]`.
    pub fn visible_range(&self, now: f64) -> Range<usize> {
        self.schedule
            .visible_range(now, self.visible_past_ms, self.visible_future_ms)
    }

    /// Stops the session. Every later judgement call is a no-op.
    pub fn end(&mut self) {
        if self.status == SessionStatus::Running {
            self.status = SessionStatus::Ended;
            log::info!(
                "SESSION: Ended ({}/{} judged, score {})",
                self.schedule.judged_count(),
                self.schedule.len(),
                self.judging.score()
            );
        }
    }

    pub fn is_ended(&self) -> bool {
        self.status == SessionStatus::Ended
    }

    /// `true` once every note has been judged.
    pub fn is_finished(&self) -> bool {
        self.schedule.judged_count() == self.schedule.len()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Smoothed clock position of the last frame (ms).
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn hit_window(&self) -> Option<&HitWindow> {
        self.window.as_ref()
    }

    pub fn schedule(&self) -> &NoteSchedule {
        &self.schedule
    }

    pub fn judging(&self) -> &JudgingState {
        &self.judging
    }

    pub fn head_index(&self) -> usize {
        self.head_index
    }

    /// Moves `head_index` past judged notes.
    pub(crate) fn advance_head(&mut self) {
        self.head_index = self.schedule.first_unjudged_from(self.head_index);
    }

    /// Miss window used for expiry; 0 without a usable profile.
    pub(crate) fn expiry_window_ms(&self) -> f64 {
        self.window
            .filter(HitWindow::is_usable)
            .map_or(0.0, |w| w.miss_ms)
    }
}
