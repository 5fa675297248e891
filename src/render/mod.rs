//! Frame presentation.
//!
//! Drawing is out of scope for the judgement core; a renderer only receives the
//! [`FrameView`] the driver built from the session's visibility query.

use crate::models::stats::Judgement;
use crate::shared::snapshot::FrameView;
use crossbeam_channel::{Sender, TrySendError};

/// Receives one view per frame.
pub trait FrameRenderer {
    fn render(&mut self, view: &FrameView);
}

/// Logs judgement changes and a periodic status line.
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_judged: usize,
    status_every: u64,
}

impl LogRenderer {
    /// `status_every` is the number of frames between status lines; 0 disables them.
    pub fn new(status_every: u64) -> Self {
        Self {
            last_judged: 0,
            status_every,
        }
    }
}

impl FrameRenderer for LogRenderer {
    fn render(&mut self, view: &FrameView) {
        let judging = &view.judging;
        if judging.judged_notes != self.last_judged {
            self.last_judged = judging.judged_notes;
            if let Some(last) = judging.last_judgement {
                let level = if last.judgement == Judgement::Miss {
                    log::Level::Debug
                } else {
                    log::Level::Trace
                };
                log::log!(
                    level,
                    "RENDER: {} ({:+.1}ms) combo {} score {}",
                    last.judgement,
                    last.diff_ms,
                    judging.combo,
                    judging.score
                );
            }
        }

        if self.status_every > 0 && view.frame % self.status_every == 0 {
            log::info!(
                "RENDER: {:>8.0}ms | {} on screen | {:.2}% | life {:.1} | {}/{}",
                judging.display_time_ms,
                view.notes.len(),
                judging.accuracy,
                judging.life,
                judging.judged_notes,
                judging.total_notes
            );
        }
    }
}

/// Forwards views to a render thread, dropping frames it has not caught up with.
#[derive(Debug, Clone)]
pub struct ChannelRenderer {
    render_tx: Sender<FrameView>,
}

impl ChannelRenderer {
    pub fn new(render_tx: Sender<FrameView>) -> Self {
        Self { render_tx }
    }
}

impl FrameRenderer for ChannelRenderer {
    fn render(&mut self, view: &FrameView) {
        match self.render_tx.try_send(view.clone()) {
            Ok(()) | Err(TrySendError::Full(_)) => {}
            Err(TrySendError::Disconnected(_)) => {
                log::trace!("RENDER: No render thread listening");
            }
        }
    }
}
