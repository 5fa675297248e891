//! Frame loop driving a judgement session.
//!
//! Each frame the driver:
//! 1. Handles control events (restart, quit)
//! 2. Samples playback and advances the clock
//! 3. Drains key events and judges them at the new time
//! 4. Expires late notes
//! 5. Hands a frame view to the renderer

pub mod audio;
pub mod autoplay;
pub mod clock;

use crate::input::bindings::KeyBindings;
use crate::logic::audio::{PlaybackSource, frame_duration};
use crate::logic::autoplay::AutoPlayer;
use crate::models::settings::JudgeSettings;
use crate::render::FrameRenderer;
use crate::shared::snapshot::FrameView;
use crate::state::game::{JudgeSession, JudgementOutcome};
use crate::system::bus::{SessionEvent, SystemBus, SystemEvent};
use std::thread;
use std::time::Instant;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every note was judged.
    Finished,
    /// Life reached 0 with `end_on_fail` set.
    Failed,
    /// A quit event arrived.
    Quit,
}

/// Result of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped(StopReason),
}

/// Owns a session and feeds it playback time and input, frame by frame.
pub struct FrameDriver<P: PlaybackSource, R: FrameRenderer> {
    session: JudgeSession,
    playback: P,
    renderer: R,
    bus: SystemBus,
    bindings: KeyBindings,
    autoplay: Option<AutoPlayer>,
    frame_rate: u32,
    end_on_fail: bool,
    frame: u64,
    finished_reported: bool,
}

impl<P: PlaybackSource, R: FrameRenderer> FrameDriver<P, R> {
    pub fn new(
        session: JudgeSession,
        playback: P,
        renderer: R,
        bus: SystemBus,
        settings: &JudgeSettings,
    ) -> Self {
        let bindings = KeyBindings::for_mode(settings, session.mode());
        Self {
            session,
            playback,
            renderer,
            bus,
            bindings,
            autoplay: None,
            frame_rate: settings.frame_rate,
            end_on_fail: settings.end_on_fail,
            frame: 0,
            finished_reported: false,
        }
    }

    /// Plays the map automatically through the key channel.
    pub fn with_autoplay(mut self, jitter_ms: f64, seed: u64) -> Self {
        self.autoplay = Some(AutoPlayer::new(
            self.session.schedule(),
            &self.bindings,
            jitter_ms,
            seed,
        ));
        self
    }

    /// Runs one frame at monotonic time `frame_time_ms`.
    pub fn run_frame(&mut self, frame_time_ms: f64) -> FrameStatus {
        while let Ok(event) = self.bus.sys_rx.try_recv() {
            match event {
                SystemEvent::Quit => {
                    log::info!("DRIVER: Quit received");
                    return FrameStatus::Stopped(StopReason::Quit);
                }
                SystemEvent::Restart => {
                    self.session.reset_judging();
                    if let Some(autoplay) = self.autoplay.as_mut() {
                        autoplay.rewind();
                    }
                    self.finished_reported = false;
                }
            }
        }

        self.session.advance_clock(
            self.playback.position_ms(),
            frame_time_ms,
            self.playback.is_playing(),
        );

        if let Some(autoplay) = self.autoplay.as_mut() {
            for event in autoplay.due_events(self.session.now()) {
                let _ = self.bus.key_tx.send(event);
            }
        }

        while let Ok(event) = self.bus.key_rx.try_recv() {
            if !event.is_press() {
                continue;
            }
            match self.bindings.resolve(&event.key) {
                Some(target) => {
                    if let Some(outcome) = self.session.strike(target) {
                        self.publish_outcome(&outcome);
                    }
                }
                None => log::trace!("DRIVER: Unbound key '{}'", event.key),
            }
        }

        let report = self.session.finish_frame();
        for outcome in &report.misses {
            self.publish_outcome(outcome);
        }

        let view = FrameView::capture(&self.session, &report, self.frame);
        self.renderer.render(&view);
        self.frame += 1;

        if self.session.is_finished() {
            if !self.finished_reported {
                self.finished_reported = true;
                let _ = self.bus.event_tx.send(SessionEvent::Finished);
            }
            return FrameStatus::Stopped(StopReason::Finished);
        }
        if self.end_on_fail && self.session.judging().is_life_depleted() {
            return FrameStatus::Stopped(StopReason::Failed);
        }
        FrameStatus::Continue
    }

    fn publish_outcome(&self, outcome: &JudgementOutcome) {
        let _ = self.bus.event_tx.send(SessionEvent::Judged(outcome.event));
        if outcome.life_depleted {
            let _ = self.bus.event_tx.send(SessionEvent::LifeDepleted);
        }
    }

    /// Runs frames at the configured frame rate until the session stops.
    ///
    /// The session is ended before returning.
    pub fn run(&mut self) -> StopReason {
        let target_dt = frame_duration(self.frame_rate);
        let started = Instant::now();
        log::info!("DRIVER: Running at {} fps", self.frame_rate);

        let reason = loop {
            let frame_start = Instant::now();
            let frame_time_ms = frame_start.duration_since(started).as_secs_f64() * 1000.0;

            if let FrameStatus::Stopped(reason) = self.run_frame(frame_time_ms) {
                break reason;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < target_dt {
                thread::sleep(target_dt - elapsed);
            }
        };

        self.session.end();
        log::info!("DRIVER: Stopped after {} frames ({:?})", self.frame, reason);
        reason
    }

    pub fn session(&self) -> &JudgeSession {
        &self.session
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Consumes the driver, returning the session.
    pub fn into_session(self) -> JudgeSession {
        self.session
    }
}
