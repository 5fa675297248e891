//! Playback position sources.
//!
//! The judgement core never drives audio. It only samples where playback is
//! and whether it is running, through [`PlaybackSource`].

use crate::system::bus::SystemBus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Anything that can report a playback position.
pub trait PlaybackSource {
    /// Current raw position in milliseconds.
    fn position_ms(&self) -> f64;

    /// Whether playback is advancing.
    fn is_playing(&self) -> bool;
}

/// Position written by an audio thread as a sample counter.
///
/// Reads the atomics published on the [`SystemBus`]; the writer is whoever
/// owns the audio device.
#[derive(Debug, Clone)]
pub struct SharedPlayback {
    position: Arc<AtomicU64>,
    sample_rate: Arc<AtomicU64>,
    channels: Arc<AtomicU64>,
    playing: Arc<AtomicBool>,
}

impl SharedPlayback {
    pub fn new(bus: &SystemBus) -> Self {
        Self {
            position: bus.audio_position.clone(),
            sample_rate: bus.audio_sample_rate.clone(),
            channels: bus.audio_channels.clone(),
            playing: bus.audio_playing.clone(),
        }
    }
}

impl PlaybackSource for SharedPlayback {
    fn position_ms(&self) -> f64 {
        let samples = self.position.load(Ordering::Relaxed) as f64;
        let sample_rate = self.sample_rate.load(Ordering::Relaxed).max(1) as f64;
        let channels = self.channels.load(Ordering::Relaxed).max(1) as f64;

        samples / (sample_rate * channels) * 1000.0
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }
}

/// A playback clock with no audio behind it.
///
/// Reports monotonic elapsed time quantized to `granularity_ms`, the way a
/// real backend reports positions once per buffer.
#[derive(Debug, Clone)]
pub struct SimulatedPlayback {
    granularity_ms: f64,
    /// Position accumulated before the current play run.
    base_ms: f64,
    started_at: Option<Instant>,
}

impl SimulatedPlayback {
    /// Creates a paused playback at `start_ms`.
    pub fn new(start_ms: f64, granularity_ms: f64) -> Self {
        Self {
            granularity_ms: granularity_ms.max(0.0),
            base_ms: start_ms,
            started_at: None,
        }
    }

    pub fn play(&mut self) {
        self.play_at(Instant::now());
    }

    pub fn play_at(&mut self, at: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(at);
        }
    }

    pub fn pause(&mut self) {
        self.pause_at(Instant::now());
    }

    pub fn pause_at(&mut self, at: Instant) {
        if let Some(started) = self.started_at.take() {
            self.base_ms += elapsed_ms(started, at);
        }
    }

    /// Jumps to `position_ms`, keeping the play/pause state.
    pub fn seek(&mut self, position_ms: f64) {
        self.seek_at(position_ms, Instant::now());
    }

    pub fn seek_at(&mut self, position_ms: f64, at: Instant) {
        self.base_ms = position_ms;
        if self.started_at.is_some() {
            self.started_at = Some(at);
        }
    }

    /// Unquantized position at `at`.
    pub fn exact_position_at(&self, at: Instant) -> f64 {
        match self.started_at {
            Some(started) => self.base_ms + elapsed_ms(started, at),
            None => self.base_ms,
        }
    }

    /// Position at `at`, quantized down to the granularity.
    pub fn position_at(&self, at: Instant) -> f64 {
        let exact = self.exact_position_at(at);
        if self.granularity_ms > 0.0 {
            (exact / self.granularity_ms).floor() * self.granularity_ms
        } else {
            exact
        }
    }
}

fn elapsed_ms(from: Instant, to: Instant) -> f64 {
    to.saturating_duration_since(from).as_secs_f64() * 1000.0
}

impl PlaybackSource for SimulatedPlayback {
    fn position_ms(&self) -> f64 {
        self.position_at(Instant::now())
    }

    fn is_playing(&self) -> bool {
        self.started_at.is_some()
    }
}

/// Duration of one frame at `frame_rate` frames per second.
pub fn frame_duration(frame_rate: u32) -> Duration {
    Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_quantizes() {
        let t0 = Instant::now();
        let mut playback = SimulatedPlayback::new(0.0, 10.0);
        playback.play_at(t0);
        let at = t0 + Duration::from_millis(57);
        assert_eq!(playback.position_at(at), 50.0);
        assert!((playback.exact_position_at(at) - 57.0).abs() < 1e-6);
    }

    #[test]
    fn test_simulated_pause_resume() {
        let t0 = Instant::now();
        let mut playback = SimulatedPlayback::new(1000.0, 0.0);
        assert!(!playback.is_playing());
        assert_eq!(playback.position_at(t0 + Duration::from_secs(5)), 1000.0);

        playback.play_at(t0);
        playback.pause_at(t0 + Duration::from_millis(200));
        assert!(!playback.is_playing());
        let paused = playback.position_at(t0 + Duration::from_secs(3));
        assert!((paused - 1200.0).abs() < 1e-6);

        let t1 = t0 + Duration::from_secs(3);
        playback.play_at(t1);
        let resumed = playback.position_at(t1 + Duration::from_millis(100));
        assert!((resumed - 1300.0).abs() < 1e-6);
    }

    #[test]
    fn test_simulated_seek() {
        let t0 = Instant::now();
        let mut playback = SimulatedPlayback::new(0.0, 0.0);
        playback.play_at(t0);
        playback.seek_at(4000.0, t0 + Duration::from_millis(500));
        let pos = playback.position_at(t0 + Duration::from_millis(600));
        assert!((pos - 4100.0).abs() < 1e-6);
    }

    #[test]
    fn test_shared_reads_samples() {
        let bus = SystemBus::new();
        let playback = SharedPlayback::new(&bus);
        bus.audio_sample_rate.store(1000, Ordering::Relaxed);
        bus.audio_channels.store(2, Ordering::Relaxed);
        bus.audio_position.store(4000, Ordering::Relaxed);
        assert_eq!(playback.position_ms(), 2000.0);
        assert!(!playback.is_playing());
        bus.audio_playing.store(true, Ordering::Relaxed);
        assert!(playback.is_playing());
    }
}
