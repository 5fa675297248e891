//! Per-frame views handed to renderers.
//!
//! A view is built on the frame thread and can be sent to another thread;
//! it holds no references into the session.

use crate::models::engine::NoteClass;
use crate::state::game::{FrameReport, JudgeSession, JudgingSnapshot};
use std::ops::Range;

/// An unjudged note inside the visible range.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleNote {
    pub index: usize,
    pub time_ms: f64,
    pub class: NoteClass,
    /// `time_ms - now`; positive for notes still approaching.
    pub offset_ms: f64,
}

/// What a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameView {
    /// Frame counter since the driver started.
    pub frame: u64,
    pub now_ms: f64,
    pub visible: Range<usize>,
    pub notes: Vec<VisibleNote>,
    pub judging: JudgingSnapshot,
}

impl FrameView {
    /// Captures the visible, still unjudged notes and the judging totals.
    pub fn capture(session: &JudgeSession, report: &FrameReport, frame: u64) -> Self {
        let schedule = session.schedule();
        let notes = report
            .visible
            .clone()
            .filter(|&i| !schedule.is_judged(i))
            .map(|i| VisibleNote {
                index: i,
                time_ms: schedule.time(i),
                class: schedule.class(i),
                offset_ms: schedule.time(i) - report.now_ms,
            })
            .collect();

        Self {
            frame,
            now_ms: report.now_ms,
            visible: report.visible.clone(),
            notes,
            judging: session.snapshot(),
        }
    }
}
