//! Per-session note arrays and the visibility-range query.
//!
//! Times and classes are fixed when the schedule is built. The judged flags are
//! the only mutable part, and a flag only ever goes from `false` to `true`.

use super::note::{HitObject, InputMode, NoteClass};
use std::ops::Range;

/// Errors raised when building a schedule.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("note {index} at {time_ms}ms is earlier than the note before it")]
    UnorderedTimes { index: usize, time_ms: f64 },
    #[error("note {index} has a non-finite time")]
    InvalidTime { index: usize },
}

/// Index-aligned note times, input classes and judged flags.
#[derive(Debug, Clone)]
pub struct NoteSchedule {
    times: Vec<f64>,
    classes: Vec<NoteClass>,
    judged: Vec<bool>,
    judged_count: usize,
}

impl NoteSchedule {
    /// Builds a schedule from time-ordered hit objects.
    pub fn from_hit_objects(objects: &[HitObject], mode: InputMode) -> Result<Self, ScheduleError> {
        let mut times = Vec::with_capacity(objects.len());
        let mut classes = Vec::with_capacity(objects.len());

        for (index, object) in objects.iter().enumerate() {
            if !object.time_ms.is_finite() {
                return Err(ScheduleError::InvalidTime { index });
            }
            if times.last().is_some_and(|&prev| object.time_ms < prev) {
                return Err(ScheduleError::UnorderedTimes {
                    index,
                    time_ms: object.time_ms,
                });
            }
            times.push(object.time_ms);
            classes.push(mode.classify(object));
        }

        Ok(Self {
            judged: vec![false; times.len()],
            times,
            classes,
            judged_count: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn time(&self, index: usize) -> f64 {
        self.times[index]
    }

    pub fn class(&self, index: usize) -> NoteClass {
        self.classes[index]
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn is_judged(&self, index: usize) -> bool {
        self.judged[index]
    }

    /// Number of notes already judged.
    pub fn judged_count(&self) -> usize {
        self.judged_count
    }

    /// Time of the last note, if any.
    pub fn last_time(&self) -> Option<f64> {
        self.times.last().copied()
    }

    /// Claims a note for judgement.
    ///
    /// Returns `true` only for the first caller; later calls (and out-of-range
    /// indices) return `false` and change nothing.
    pub fn try_judge(&mut self, index: usize) -> bool {
        match self.judged.get_mut(index) {
            Some(flag) if !*flag => {
                *flag = true;
                self.judged_count += 1;
                true
            }
            _ => false,
        }
    }

    /// Clears every judged flag.
    pub fn reset(&mut self) {
        self.judged.fill(false);
        self.judged_count = 0;
    }

    /// Index range `[start, end)` of notes with
    /// `now - past_window_ms <= time <= now + future_window_ms`.
    pub fn visible_range(&self, now: f64, past_window_ms: f64, future_window_ms: f64) -> Range<usize> {
        let lower_bound = now - past_window_ms;
        let upper_bound = now + future_window_ms;

        let start = self.times.partition_point(|&t| t < lower_bound);
        let mut end = start;
        while end < self.times.len() && self.times[end] <= upper_bound {
            end += 1;
        }

        start..end
    }

    /// First index at or after `from` whose flag is still unset.
    pub fn first_unjudged_from(&self, from: usize) -> usize {
        let mut index = from;
        while index < self.judged.len() && self.judged[index] {
            index += 1;
        }
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(times: &[f64]) -> NoteSchedule {
        let objects: Vec<HitObject> = times.iter().map(|&t| HitObject::tap(64, t)).collect();
        NoteSchedule::from_hit_objects(&objects, InputMode::Mania { key_count: 4 }).unwrap()
    }

    #[test]
    fn test_visible_range_bounds() {
        let s = schedule(&[0.0, 500.0, 1000.0, 1500.0, 6000.0]);
        assert_eq!(s.visible_range(1000.0, 200.0, 4000.0), 2..4);
        assert_eq!(s.visible_range(1000.0, 500.0, 5000.0), 1..5);
        assert_eq!(s.visible_range(-10_000.0, 200.0, 100.0), 0..0);
        assert_eq!(s.visible_range(100_000.0, 200.0, 4000.0), 5..5);
    }

    #[test]
    fn test_visible_range_is_idempotent() {
        let s = schedule(&[100.0, 200.0, 200.0, 300.0, 4000.0]);
        let first = s.visible_range(250.0, 200.0, 1000.0);
        let second = s.visible_range(250.0, 200.0, 1000.0);
        assert_eq!(first, second);
        assert_eq!(first, 0..4);
    }

    #[test]
    fn test_try_judge_once() {
        let mut s = schedule(&[0.0, 10.0]);
        assert!(s.try_judge(1));
        assert!(!s.try_judge(1));
        assert!(!s.try_judge(7));
        assert_eq!(s.judged_count(), 1);
        assert!(s.is_judged(1));
        assert!(!s.is_judged(0));

        s.reset();
        assert_eq!(s.judged_count(), 0);
        assert!(!s.is_judged(1));
    }

    #[test]
    fn test_rejects_unordered_times() {
        let objects = vec![HitObject::tap(64, 100.0), HitObject::tap(64, 50.0)];
        let err = NoteSchedule::from_hit_objects(&objects, InputMode::Taiko).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnorderedTimes {
                index: 1,
                time_ms: 50.0
            }
        );
    }

    #[test]
    fn test_first_unjudged_from() {
        let mut s = schedule(&[0.0, 1.0, 2.0]);
        s.try_judge(0);
        s.try_judge(1);
        assert_eq!(s.first_unjudged_from(0), 2);
        s.try_judge(2);
        assert_eq!(s.first_unjudged_from(0), 3);
    }

    #[test]
    fn test_empty_schedule() {
        let s = schedule(&[]);
        assert!(s.is_empty());
        assert_eq!(s.last_time(), None);
        assert_eq!(s.visible_range(0.0, 200.0, 4000.0), 0..0);
    }
}
