//! Scripted input that plays a schedule with human-like timing error.

use crate::input::bindings::KeyBindings;
use crate::input::events::KeyEvent;
use crate::models::engine::NoteSchedule;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Emits one key press per note at `note time + jitter`.
#[derive(Debug, Clone)]
pub struct AutoPlayer {
    /// (planned hit time, key), ordered by hit time.
    plan: Vec<(f64, String)>,
    cursor: usize,
}

impl AutoPlayer {
    /// Plans presses for every note whose target has a bound key.
    ///
    /// Each press is offset by a uniform random delta in `[-jitter_ms, jitter_ms]`.
    pub fn new(schedule: &NoteSchedule, bindings: &KeyBindings, jitter_ms: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let jitter_ms = jitter_ms.abs();
        let mut unbound = 0usize;

        let mut plan = Vec::with_capacity(schedule.len());
        for index in 0..schedule.len() {
            let Some(key) = bindings.key_for(schedule.class(index)) else {
                unbound += 1;
                continue;
            };
            let offset = if jitter_ms > 0.0 {
                rng.random_range(-jitter_ms..=jitter_ms)
            } else {
                0.0
            };
            plan.push((schedule.time(index) + offset, key.to_string()));
        }
        plan.sort_by(|a, b| a.0.total_cmp(&b.0));

        if unbound > 0 {
            log::warn!("DRIVER: Autoplay skips {} note(s) with no bound key", unbound);
        }

        Self { plan, cursor: 0 }
    }

    /// Presses due at or before `now`, in order.
    pub fn due_events(&mut self, now: f64) -> Vec<KeyEvent> {
        let start = self.cursor;
        while self.cursor < self.plan.len() && self.plan[self.cursor].0 <= now {
            self.cursor += 1;
        }
        self.plan[start..self.cursor]
            .iter()
            .map(|(_, key)| KeyEvent::down(key.clone()))
            .collect()
    }

    /// Number of presses not yet emitted.
    pub fn remaining(&self) -> usize {
        self.plan.len() - self.cursor
    }

    /// Starts over from the first press.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::engine::{HitObject, InputMode};
    use crate::models::settings::JudgeSettings;

    fn setup(times: &[(i32, f64)]) -> (NoteSchedule, KeyBindings) {
        let mode = InputMode::Mania { key_count: 4 };
        let objects: Vec<HitObject> = times.iter().map(|&(x, t)| HitObject::tap(x, t)).collect();
        let schedule = NoteSchedule::from_hit_objects(&objects, mode).unwrap();
        let bindings = KeyBindings::for_mode(&JudgeSettings::default(), mode);
        (schedule, bindings)
    }

    #[test]
    fn test_exact_presses_without_jitter() {
        let (schedule, bindings) = setup(&[(64, 100.0), (448, 200.0)]);
        let mut auto = AutoPlayer::new(&schedule, &bindings, 0.0, 1);
        assert!(auto.due_events(99.0).is_empty());
        assert_eq!(auto.due_events(100.0), vec![KeyEvent::down("d")]);
        assert_eq!(auto.due_events(500.0), vec![KeyEvent::down("k")]);
        assert_eq!(auto.remaining(), 0);

        auto.rewind();
        assert_eq!(auto.remaining(), 2);
    }

    #[test]
    fn test_jitter_is_bounded_and_seeded() {
        let notes: Vec<(i32, f64)> = (0..50).map(|i| (64, 1000.0 + i as f64 * 100.0)).collect();
        let (schedule, bindings) = setup(&notes);
        let a = AutoPlayer::new(&schedule, &bindings, 10.0, 42);
        let b = AutoPlayer::new(&schedule, &bindings, 10.0, 42);
        for (i, (time, _)) in a.plan.iter().enumerate() {
            assert!((time - (1000.0 + i as f64 * 100.0)).abs() <= 10.0);
        }
        assert_eq!(a.plan, b.plan);
    }
}
