//! Shared channel infrastructure between the frame thread and its producers.
//!
//! Key events may come from any thread; they are only ever applied on the
//! thread running the frame driver, which drains `key_rx` each frame.

use crate::input::events::KeyEvent;
use crate::shared::snapshot::FrameView;
use crate::state::game::JudgementEvent;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64};

/// Control requests for the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemEvent {
    /// Clear all judgements and start over.
    Restart,
    /// Stop the driver.
    Quit,
}

/// Notifications emitted by the session as it is driven.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A note was judged, by input or by expiry.
    Judged(JudgementEvent),
    /// Life reached 0. Sent once per session.
    LifeDepleted,
    /// Every note has been judged.
    Finished,
}

/// Aggregates the cross-thread communication channels.
#[derive(Clone)]
pub struct SystemBus {
    /// Producers → Frame thread: raw key events.
    pub key_tx: Sender<KeyEvent>,
    pub key_rx: Receiver<KeyEvent>,

    /// Frame thread → Listeners: session notifications.
    pub event_tx: Sender<SessionEvent>,
    pub event_rx: Receiver<SessionEvent>,

    /// Frame thread → Render: frame views.
    pub render_tx: Sender<FrameView>,
    pub render_rx: Receiver<FrameView>,

    /// Main → Frame thread: control events.
    pub sys_tx: Sender<SystemEvent>,
    pub sys_rx: Receiver<SystemEvent>,

    /// Shared audio position in samples.
    /// Written by the audio thread, read by the frame thread.
    pub audio_position: Arc<AtomicU64>,

    /// Current audio sample rate.
    pub audio_sample_rate: Arc<AtomicU64>,

    /// Number of audio channels.
    pub audio_channels: Arc<AtomicU64>,

    /// Whether the audio thread is currently playing.
    pub audio_playing: Arc<AtomicBool>,
}

impl SystemBus {
    /// Creates a new system bus with all channels initialized.
    pub fn new() -> Self {
        let (key_tx, key_rx) = unbounded();
        let (event_tx, event_rx) = unbounded();

        // Bounded render channel: max 2 frames queued to limit latency
        let (render_tx, render_rx) = bounded(2);

        let (sys_tx, sys_rx) = unbounded();

        Self {
            key_tx,
            key_rx,
            event_tx,
            event_rx,
            render_tx,
            render_rx,
            sys_tx,
            sys_rx,
            audio_position: Arc::new(AtomicU64::new(0)),
            audio_sample_rate: Arc::new(AtomicU64::new(44100)),
            audio_channels: Arc::new(AtomicU64::new(2)),
            audio_playing: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for SystemBus {
    fn default() -> Self {
        Self::new()
    }
}
