//! Neon Dash - A side-scrolling obstacle runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, scoring)
//! - `session`: Menu/play/game-over flow driving the audio and persistence collaborators
//! - `persistence`: Key-value storage for records and settings
//! - `highscores`: Leaderboard and personal record
//! - `audio`: Music/alarm cue handling

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::{Leaderboard, LeaderboardEntry, PersonalRecord};
pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
///
/// Physics values are per simulation tick (60 ticks per second).
pub mod consts {
    /// Simulation rate the per-tick constants are tuned for
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    // Physics (fast & heavy)
    pub const GRAVITY: f32 = 1.6;
    pub const JUMP_FORCE: f32 = -19.0;
    pub const TERMINAL_VELOCITY: f32 = 25.0;

    // Rocket flight
    /// Upward acceleration while flight input is held
    pub const ROCKET_THRUST: f32 = 1.2;
    /// Downward acceleration while flight input is released
    pub const ROCKET_GRAVITY: f32 = 0.9;
    /// Vertical speed cap in either direction while flying
    pub const ROCKET_MAX_SPEED: f32 = 9.0;

    // Speed progression
    pub const BASE_SPEED: f32 = 10.5;
    /// How much speed to add per threshold crossed
    pub const SPEED_STEP_INCREASE: f32 = 1.5;
    /// Every 3500 points
    pub const SCORE_THRESHOLD_FOR_SPEED: u64 = 3500;
    pub const MAX_SPEED: f32 = 35.0;

    // Scoring
    /// Awarded once per hazard the player gets past
    pub const PASS_SCORE: u64 = 100;
    /// Awarded once per coin
    pub const COIN_SCORE: u64 = 250;

    // Dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 450.0;
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const COIN_SIZE: f32 = 20.0;
    pub const RING_SIZE: f32 = 80.0;
    pub const BLADE_SIZE: f32 = 50.0;
    pub const FLOOR_HEIGHT: f32 = 100.0;
    /// Screen y of the floor surface
    pub const FLOOR_Y: f32 = CANVAS_HEIGHT - FLOOR_HEIGHT;
    /// Fixed screen x of the player's left edge
    pub const PLAYER_X: f32 = 150.0;

    // Collision window
    /// Widest obstacle the timeline may hold (floor gaps included)
    pub const MAX_OBSTACLE_WIDTH: f32 = 240.0;
    /// Extra slack on both sides of the player when picking collision candidates
    pub const COLLISION_MARGIN: f32 = 60.0;
    /// How far above a surface the feet may have been last tick and still land on it
    pub const LANDING_TOLERANCE: f32 = 6.0;

    // Endless generation
    pub const CHUNK_SIZE: usize = 15;
    /// Extend the timeline when its frontier is closer than this to the player
    pub const LOOKAHEAD_DISTANCE: f32 = CANVAS_WIDTH * 2.0;
    /// Obstacles this far behind the player are dropped from the timeline
    pub const PRUNE_DISTANCE: f32 = CANVAS_WIDTH;

    // Oscillation (amplitude in px, period in ticks)
    pub const BLADE_AMPLITUDE: f32 = 40.0;
    pub const BLADE_PERIOD: u32 = 120;
    /// Larger than the spike's height so it fully retracts into the floor
    pub const MOVING_SPIKE_AMPLITUDE: f32 = 45.0;
    pub const MOVING_SPIKE_PERIOD: u32 = 90;
    pub const PLATFORM_AMPLITUDE: f32 = 40.0;
    pub const PLATFORM_PERIOD: u32 = 180;
}

/// Convert an elevation above the floor into a screen y (y grows downward)
#[inline]
pub fn elevation_to_screen_y(elevation: f32) -> f32 {
    consts::FLOOR_Y - elevation
}
