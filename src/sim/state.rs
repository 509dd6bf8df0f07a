//! Game state and core simulation types
//!
//! All state that must survive between ticks lives here. The UI only ever
//! reads it; every mutation goes through `tick` or the run lifecycle methods.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::default_level;
use super::score::ScoreController;
use super::timeline::Timeline;
use crate::consts::*;
use crate::elevation_to_screen_y;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting in the menu, nothing simulated
    #[default]
    Menu,
    /// Active run
    Playing,
    /// Run ended by a lethal collision
    GameOver,
    /// Endless run is materializing its opening chunk
    GeneratingLevel,
}

/// Which obstacle source a run starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Authored level first, procedural extension afterwards
    #[default]
    Normal,
    /// Procedural from the first obstacle
    Infinite,
}

/// How the player body moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerMode {
    /// Gravity + single jump
    #[default]
    Cube,
    /// Held input thrusts upward
    Rocket,
}

impl PlayerMode {
    pub fn toggled(self) -> Self {
        match self {
            PlayerMode::Cube => PlayerMode::Rocket,
            PlayerMode::Rocket => PlayerMode::Cube,
        }
    }
}

/// Axis-aligned box. x is in world space, y in screen space (grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Horizontal extents overlap (ignores y)
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// Vertical oscillation around a center elevation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillation {
    /// Elevation the motion is centered on
    pub center: f32,
    pub amplitude: f32,
    /// Full cycle length in ticks
    pub period_ticks: u32,
}

impl Oscillation {
    pub fn blade(center: f32) -> Self {
        Self {
            center,
            amplitude: BLADE_AMPLITUDE,
            period_ticks: BLADE_PERIOD,
        }
    }

    pub fn moving_spike(center: f32) -> Self {
        Self {
            center,
            amplitude: MOVING_SPIKE_AMPLITUDE,
            period_ticks: MOVING_SPIKE_PERIOD,
        }
    }

    pub fn platform(center: f32) -> Self {
        Self {
            center,
            amplitude: PLATFORM_AMPLITUDE,
            period_ticks: PLATFORM_PERIOD,
        }
    }

    /// Live elevation after `ticks` simulation steps
    pub fn elevation_at(&self, ticks: u64) -> f32 {
        if self.period_ticks == 0 {
            return self.center;
        }
        let phase = (ticks % self.period_ticks as u64) as f32 / self.period_ticks as f32;
        self.center + self.amplitude * (phase * std::f32::consts::TAU).sin()
    }
}

/// Obstacle types, carrying only what each kind needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    Spike,
    Block,
    /// Missing floor across the obstacle's width
    FloorGap,
    Coin,
    FireRing,
    RocketPickup,
    SpinningBlade(Oscillation),
    MovingSpike(Oscillation),
    MovingPlatform(Oscillation),
}

impl ObstacleKind {
    pub fn oscillation(&self) -> Option<&Oscillation> {
        match self {
            ObstacleKind::SpinningBlade(osc)
            | ObstacleKind::MovingSpike(osc)
            | ObstacleKind::MovingPlatform(osc) => Some(osc),
            _ => None,
        }
    }

    /// Touching it ends the run
    pub fn is_lethal(&self) -> bool {
        matches!(
            self,
            ObstacleKind::Spike | ObstacleKind::MovingSpike(_) | ObstacleKind::SpinningBlade(_)
        )
    }

    /// Can be stood on
    pub fn is_solid(&self) -> bool {
        matches!(self, ObstacleKind::Block | ObstacleKind::MovingPlatform(_))
    }

    pub fn is_collectible(&self) -> bool {
        matches!(self, ObstacleKind::Coin | ObstacleKind::RocketPickup)
    }

    /// Getting past it is worth points
    pub fn counts_for_pass(&self) -> bool {
        !self.is_collectible()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Spike => "spike",
            ObstacleKind::Block => "block",
            ObstacleKind::FloorGap => "floor gap",
            ObstacleKind::Coin => "coin",
            ObstacleKind::FireRing => "fire ring",
            ObstacleKind::RocketPickup => "rocket pickup",
            ObstacleKind::SpinningBlade(_) => "spinning blade",
            ObstacleKind::MovingSpike(_) => "moving spike",
            ObstacleKind::MovingPlatform(_) => "moving platform",
        }
    }
}

/// An obstacle on the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Assigned by the timeline; 0 until then
    pub id: u32,
    pub kind: ObstacleKind,
    /// World x of the left edge
    pub x: f32,
    /// Live elevation of the bottom edge above the floor
    pub elevation: f32,
    pub width: f32,
    pub height: f32,
    /// Pass score already awarded
    #[serde(default)]
    pub passed: bool,
    /// Collected (coins, pickups) or consumed (fire rings)
    #[serde(default)]
    pub collected: bool,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f32, elevation: f32, width: f32, height: f32) -> Self {
        Self {
            id: 0,
            kind,
            x,
            elevation,
            width,
            height,
            passed: false,
            collected: false,
        }
    }

    pub fn spike(x: f32, elevation: f32) -> Self {
        Self::new(ObstacleKind::Spike, x, elevation, 30.0, 30.0)
    }

    pub fn block(x: f32, elevation: f32) -> Self {
        Self::new(ObstacleKind::Block, x, elevation, 40.0, 40.0)
    }

    pub fn coin(x: f32, elevation: f32) -> Self {
        Self::new(ObstacleKind::Coin, x, elevation, COIN_SIZE, COIN_SIZE)
    }

    pub fn rocket_pickup(x: f32, elevation: f32) -> Self {
        Self::new(ObstacleKind::RocketPickup, x, elevation, 30.0, 15.0)
    }

    pub fn fire_ring(x: f32, elevation: f32) -> Self {
        Self::new(ObstacleKind::FireRing, x, elevation, RING_SIZE, RING_SIZE)
    }

    pub fn floor_gap(x: f32, width: f32) -> Self {
        Self::new(ObstacleKind::FloorGap, x, 0.0, width, FLOOR_HEIGHT)
    }

    pub fn spinning_blade(x: f32, center: f32) -> Self {
        Self::new(
            ObstacleKind::SpinningBlade(Oscillation::blade(center)),
            x,
            center,
            BLADE_SIZE,
            BLADE_SIZE,
        )
    }

    pub fn moving_spike(x: f32, center: f32) -> Self {
        Self::new(
            ObstacleKind::MovingSpike(Oscillation::moving_spike(center)),
            x,
            center,
            30.0,
            35.0,
        )
    }

    pub fn moving_platform(x: f32, center: f32) -> Self {
        Self::new(
            ObstacleKind::MovingPlatform(Oscillation::platform(center)),
            x,
            center,
            60.0,
            20.0,
        )
    }

    /// World x of the right edge
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Recompute the live elevation for oscillating kinds
    pub fn update_motion(&mut self, ticks: u64) {
        if let Some(osc) = self.kind.oscillation() {
            self.elevation = osc.elevation_at(ticks);
        }
    }

    /// Live collision box
    pub fn bounds(&self) -> Aabb {
        let bottom = elevation_to_screen_y(self.elevation);
        Aabb::new(self.x, bottom - self.height, self.width, self.height)
    }
}

/// What the player is standing on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Support {
    #[default]
    Floor,
    /// Standing on a solid obstacle (by id)
    Obstacle(u32),
    Air,
}

/// The player body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Screen position of the top-left corner; x never changes
    pub pos: Vec2,
    /// Vertical velocity in px/tick (negative is up)
    pub vel_y: f32,
    /// y before the last integration step
    pub prev_y: f32,
    pub support: Support,
    pub mode: PlayerMode,
    pub alive: bool,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerState {
    /// Standing on the floor at the fixed screen x
    pub fn new() -> Self {
        let y = Self::ground_y();
        Self {
            pos: Vec2::new(PLAYER_X, y),
            vel_y: 0.0,
            prev_y: y,
            support: Support::Floor,
            mode: PlayerMode::Cube,
            alive: true,
        }
    }

    /// Top-edge y when resting on the floor
    #[inline]
    pub fn ground_y() -> f32 {
        FLOOR_Y - PLAYER_SIZE
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.support != Support::Air
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }

    #[inline]
    pub fn prev_bottom(&self) -> f32 {
        self.prev_y + PLAYER_SIZE
    }

    /// World-space collision box for the given scroll distance
    pub fn bounds(&self, distance: f32) -> Aabb {
        Aabb::new(distance + self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    /// Place the feet on a surface at screen y `top`
    pub fn stand_on(&mut self, top: f32, support: Support) {
        self.pos.y = top - PLAYER_SIZE;
        self.vel_y = 0.0;
        self.support = support;
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Lethal contact with an obstacle
    Obstacle { id: u32, kind: ObstacleKind },
    /// Dropped through a floor gap
    Fell,
}

/// Things that happened during a tick (cosmetics, HUD, sound)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed { obstacle: Option<u32> },
    CoinCollected { id: u32, points: u64 },
    PickupArmed { id: u32 },
    ModeChanged { mode: PlayerMode },
    ObstaclePassed { id: u32, points: u64 },
    SpeedUp { speed: f32 },
    ChunkGenerated { beats: usize, frontier: f32 },
    Died { cause: DeathCause },
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Generator randomness
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub mode: GameMode,
    /// Score and speed progression
    pub scoring: ScoreController,
    /// Simulation ticks since the run started
    pub time_ticks: u64,
    /// How far the world has scrolled
    pub distance: f32,
    pub player: PlayerState,
    pub timeline: Timeline,
    /// A rocket pickup is waiting for a fire ring
    pub pickup_armed: bool,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session in the menu
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            mode: GameMode::Normal,
            scoring: ScoreController::new(),
            time_ticks: 0,
            distance: 0.0,
            player: PlayerState::new(),
            timeline: Timeline::new(),
            pickup_armed: false,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.scoring.speed()
    }

    /// World x of the player's left edge
    #[inline]
    pub fn player_world_x(&self) -> f32 {
        self.distance + self.player.pos.x
    }

    /// Reset everything run-scoped and leave the menu
    ///
    /// Returns false (and changes nothing) unless in the menu.
    pub fn start_run(&mut self, mode: GameMode) -> bool {
        if self.phase != GamePhase::Menu {
            return false;
        }

        self.mode = mode;
        self.scoring.reset();
        self.time_ticks = 0;
        self.distance = 0.0;
        self.player = PlayerState::new();
        self.pickup_armed = false;
        self.events.clear();

        match mode {
            GameMode::Normal => {
                self.timeline = Timeline::from_obstacles(default_level());
                self.phase = GamePhase::Playing;
            }
            GameMode::Infinite => {
                self.timeline = Timeline::new();
                self.phase = GamePhase::GeneratingLevel;
            }
        }

        log::info!(
            "Run started: {:?} mode, {} authored obstacles",
            mode,
            self.timeline.len()
        );
        true
    }

    /// Leave the game-over screen
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            return false;
        }
        self.phase = GamePhase::Menu;
        true
    }
}
