//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Obstacles kept in x order with stable IDs
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod generator;
pub mod level;
pub mod player;
pub mod score;
pub mod state;
pub mod tick;
pub mod timeline;

pub use collision::{CollisionEvent, CollisionOutcome, resolve};
pub use generator::{Beat, Pattern, RandomSource, SequenceSource, generate_beats, generate_chunk};
pub use level::default_level;
pub use player::FlightInput;
pub use score::ScoreController;
pub use state::{
    Aabb, DeathCause, GameEvent, GameMode, GamePhase, GameState, Obstacle, ObstacleKind,
    Oscillation, PlayerMode, PlayerState, Support,
};
pub use tick::{TickInput, tick};
pub use timeline::Timeline;
