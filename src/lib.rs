//! Real-time judgement engine for mania and taiko rhythm games.
//!
//! A [`JudgeSession`](state::JudgeSession) turns a jittery playback position
//! and a stream of key presses into per-note judgements, combo, life and
//! score. The [`FrameDriver`](logic::FrameDriver) runs a session frame by
//! frame against a [`PlaybackSource`](logic::audio::PlaybackSource).

pub mod input;
pub mod logic;
pub mod models;
pub mod render;
pub mod scoring;
pub mod shared;
pub mod state;
pub mod system;
