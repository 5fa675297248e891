//! Plays a .osu map with autoplay input and prints the final judgement snapshot.

mod cli;

use clap::Parser;
use cli::Args;
use rvsrg_judge::logic::audio::SimulatedPlayback;
use rvsrg_judge::logic::{FrameDriver, StopReason};
use rvsrg_judge::models::engine::load_map;
use rvsrg_judge::models::settings::JudgeSettings;
use rvsrg_judge::render::LogRenderer;
use rvsrg_judge::scoring::ScoringRegistry;
use rvsrg_judge::state::JudgeSession;
use rvsrg_judge::system::bus::{SessionEvent, SystemBus};
use std::process::ExitCode;

/// Lead-in before the first note (ms).
const PRE_ROLL_MS: f64 = 1500.0;
/// Position granularity of the simulated audio device (ms).
const PLAYBACK_GRANULARITY_MS: f64 = 10.0;

fn main() -> ExitCode {
    let args = Args::parse();

    if std::env::var_os("RUST_LOG").is_none() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let settings = match &args.settings {
        Some(path) => JudgeSettings::load_or_default(path),
        None => JudgeSettings::default(),
    };

    log::info!("MAIN: Booting rvsrg-judge...");

    let map = match load_map(&args.map) {
        Ok(map) => map,
        Err(e) => {
            log::error!("MAP: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let registry = ScoringRegistry::new();
    let session = match JudgeSession::from_map(&map, &settings, &registry) {
        Ok(session) => session,
        Err(e) => {
            log::error!("SESSION: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut playback = SimulatedPlayback::new(-PRE_ROLL_MS, PLAYBACK_GRANULARITY_MS);
    playback.play();

    let bus = SystemBus::new();
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("MAIN: Autoplay seed {}", seed);

    let mut driver = FrameDriver::new(
        session,
        playback,
        LogRenderer::new(u64::from(settings.frame_rate)),
        bus.clone(),
        &settings,
    )
    .with_autoplay(args.jitter, seed);

    let reason = driver.run();

    let judged = bus
        .event_rx
        .try_iter()
        .filter(|e| matches!(e, SessionEvent::Judged(_)))
        .count();
    log::info!("MAIN: {} judgement events, stopped: {:?}", judged, reason);

    let snapshot = driver.into_session().snapshot();
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("MAIN: Failed to serialize snapshot: {}", e),
    }

    if reason == StopReason::Failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
