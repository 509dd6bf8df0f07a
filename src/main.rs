//! Neon Dash - headless runner
//!
//! Plays one autopilot run against the real simulation and records the
//! result in the data directory.
//!
//! Environment:
//! - `NEON_DASH_DATA`: directory for the JSON records (default `.neon_dash`)
//! - `NEON_DASH_SEED`: u64 seed for the generator (default: clock)
//! - `RUST_LOG`: log verbosity

use neon_dash::audio::AudioManager;
use neon_dash::persistence::{FileStorage, RecordStore, Storage};
use neon_dash::platform::now_ms;
use neon_dash::sim::{GameEvent, GamePhase, TickInput};
use neon_dash::{Session, Settings};

/// Give up after five minutes of simulated play
const MAX_TICKS: u64 = 60 * 60 * 5;
/// Progress log interval (ten simulated seconds)
const PROGRESS_TICKS: u64 = 600;

fn main() {
    env_logger::init();

    let data_dir = std::env::var("NEON_DASH_DATA").unwrap_or_else(|_| ".neon_dash".to_string());
    let seed = std::env::var("NEON_DASH_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| now_ms() as u64);
    log::info!("Neon Dash (headless) starting, seed {seed}, data in {data_dir}");

    let mut storage = FileStorage::new(&data_dir);
    let settings = Settings::load(&storage);
    if storage.read(neon_dash::settings::SETTINGS_KEY).ok().flatten().is_none() {
        if let Err(e) = settings.save(&mut storage) {
            log::warn!("Could not write default settings: {e}");
        }
    }

    let audio = AudioManager::from_settings(&settings);
    let recorder = RecordStore::open(storage);
    let mut session = Session::new(seed, settings.profile(), audio, recorder);
    session.start(settings.preferred_mode);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let mut coins = 0u32;
    let mut mode_changes = 0u32;
    let mut snapshot = session.snapshot();

    for ticks in 1..=MAX_TICKS {
        snapshot = session.tick(&input);

        for event in session.events() {
            match event {
                GameEvent::CoinCollected { .. } => coins += 1,
                GameEvent::ModeChanged { mode } => {
                    mode_changes += 1;
                    log::debug!("Now flying as {mode:?}");
                }
                GameEvent::SpeedUp { speed } => log::info!("Speed up to {speed:.1}"),
                _ => {}
            }
        }

        if snapshot.phase == GamePhase::GameOver {
            break;
        }
        if ticks % PROGRESS_TICKS == 0 {
            log::info!(
                "{}s: score {}, distance {:.0}, speed {:.1}",
                ticks / 60,
                snapshot.score,
                snapshot.distance,
                snapshot.speed
            );
        }
    }

    if snapshot.phase != GamePhase::GameOver {
        log::info!("Tick limit reached, run still alive");
    }

    println!("Mode:        {:?}", snapshot.mode);
    println!("Score:       {}", snapshot.score);
    println!("Distance:    {:.0}", snapshot.distance);
    println!("Coins:       {coins}");
    println!("Mode swaps:  {mode_changes}");
    println!("High score:  {}", snapshot.high_score);
    if snapshot.new_record {
        println!("New personal record!");
    }

    let (_, recorder) = session.into_parts();
    println!("\nLeaderboard:");
    for (rank, entry) in recorder.leaderboard().entries().iter().take(10).enumerate() {
        println!("{:>3}. {:<16} {:>8}", rank + 1, entry.name, entry.score);
    }
}
