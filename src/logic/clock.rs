//! Smoothed playback clock and the throttled display clock.
//!
//! Audio backends report their position in coarse, jittery steps. The smoother
//! dead-reckons between samples using frame time and eases toward each new
//! sample, snapping only when the gap is too large to hide.

/// Frame deltas at or above this are treated as hitches and not dead-reckoned (ms).
pub const MAX_DEAD_RECKON_DELTA_MS: f64 = 100.0;
/// Gap between raw and smoothed position that forces a snap (ms).
pub const SNAP_THRESHOLD_MS: f64 = 120.0;
/// Fraction of the remaining gap corrected per frame.
pub const CORRECTION_FACTOR: f64 = 0.12;

/// Converts raw playback samples into a stable "now".
#[derive(Debug, Clone, Default)]
pub struct ClockSmoother {
    smoothed_ms: f64,
    last_frame_time_ms: Option<f64>,
}

impl ClockSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the clock by one frame and returns the smoothed position.
    ///
    /// `frame_time_ms` is a monotonic frame timestamp, `raw_position_ms` the
    /// position the playback source reports. Dead reckoning only happens while
    /// `playing`; a paused clock just converges toward the raw position.
    pub fn advance(&mut self, raw_position_ms: f64, frame_time_ms: f64, playing: bool) -> f64 {
        let Some(last_frame_time) = self.last_frame_time_ms.replace(frame_time_ms) else {
            self.smoothed_ms = raw_position_ms;
            return self.smoothed_ms;
        };

        let frame_delta = frame_time_ms - last_frame_time;
        if playing && frame_delta > 0.0 && frame_delta < MAX_DEAD_RECKON_DELTA_MS {
            self.smoothed_ms += frame_delta;
        }

        let diff = raw_position_ms - self.smoothed_ms;
        if diff.abs() > SNAP_THRESHOLD_MS {
            log::debug!(
                "CLOCK: Snapped {:.1}ms -> {:.1}ms (drift {:.1}ms)",
                self.smoothed_ms,
                raw_position_ms,
                diff
            );
            self.smoothed_ms = raw_position_ms;
        } else {
            self.smoothed_ms += diff * CORRECTION_FACTOR;
        }

        self.smoothed_ms
    }

    /// Current smoothed position (ms).
    pub fn now(&self) -> f64 {
        self.smoothed_ms
    }

    /// Whether a frame has been advanced since construction or the last reset.
    pub fn is_initialized(&self) -> bool {
        self.last_frame_time_ms.is_some()
    }

    /// Forgets the position and frame history; the next frame re-initializes
    /// from the raw position.
    pub fn reset(&mut self) {
        self.smoothed_ms = 0.0;
        self.last_frame_time_ms = None;
    }
}

/// Running time shown to the player, refreshed at a bounded rate.
///
/// Judgement never reads this clock.
#[derive(Debug, Clone)]
pub struct DisplayClock {
    refresh_ms: f64,
    shown_ms: f64,
    last_refresh_ms: Option<f64>,
}

impl DisplayClock {
    pub fn new(refresh_ms: f64) -> Self {
        Self {
            refresh_ms,
            shown_ms: 0.0,
            last_refresh_ms: None,
        }
    }

    /// Offers a new time; it is shown only if `refresh_ms` passed since the last refresh.
    pub fn update(&mut self, now_ms: f64, frame_time_ms: f64) -> bool {
        let due = self
            .last_refresh_ms
            .is_none_or(|last| frame_time_ms - last >= self.refresh_ms);
        if due {
            self.shown_ms = now_ms;
            self.last_refresh_ms = Some(frame_time_ms);
        }
        due
    }

    pub fn shown_ms(&self) -> f64 {
        self.shown_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_initializes() {
        let mut clock = ClockSmoother::new();
        assert_eq!(clock.advance(5000.0, 0.0, true), 5000.0);
    }

    #[test]
    fn test_dead_reckons_between_samples() {
        let mut clock = ClockSmoother::new();
        clock.advance(1000.0, 0.0, true);
        // Raw position lags one frame behind; the smoother runs ahead on frame time.
        let now = clock.advance(1000.0, 16.0, true);
        assert!((now - (1016.0 + (1000.0 - 1016.0) * CORRECTION_FACTOR)).abs() < 1e-9);
    }

    #[test]
    fn test_snaps_on_large_gap() {
        let mut clock = ClockSmoother::new();
        clock.advance(1000.0, 0.0, true);
        assert_eq!(clock.advance(3000.0, 16.0, true), 3000.0);
        assert_eq!(clock.advance(500.0, 32.0, true), 500.0);
    }

    #[test]
    fn test_hitch_is_not_dead_reckoned() {
        let mut clock = ClockSmoother::new();
        clock.advance(1000.0, 0.0, true);
        // 150ms frame: no dead reckoning, only correction toward raw.
        let now = clock.advance(1100.0, 150.0, true);
        assert!((now - (1000.0 + 100.0 * CORRECTION_FACTOR)).abs() < 1e-9);
    }

    #[test]
    fn test_paused_does_not_drift() {
        let mut clock = ClockSmoother::new();
        clock.advance(2000.0, 0.0, false);
        for frame in 1..100 {
            clock.advance(2000.0, frame as f64 * 16.0, false);
        }
        assert_eq!(clock.now(), 2000.0);
    }

    #[test]
    fn test_converges_to_steady_raw() {
        let mut clock = ClockSmoother::new();
        clock.advance(0.0, 0.0, true);
        clock.advance(50.0, 200.0, true);
        for i in 0..200 {
            clock.advance(50.0, 200.0 + i as f64 * 200.0, true);
        }
        assert!((clock.now() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_reset_forgets_position() {
        let mut clock = ClockSmoother::new();
        assert!(!clock.is_initialized());
        clock.advance(5000.0, 0.0, true);
        assert!(clock.is_initialized());

        clock.reset();
        assert!(!clock.is_initialized());
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.advance(0.0, 16.0, true), 0.0);
    }

    #[test]
    fn test_display_clock_throttles() {
        let mut display = DisplayClock::new(100.0);
        assert!(display.update(10.0, 0.0));
        assert!(!display.update(20.0, 50.0));
        assert_eq!(display.shown_ms(), 10.0);
        assert!(display.update(30.0, 100.0));
        assert_eq!(display.shown_ms(), 30.0);
    }
}
