//! Fixed timestep simulation tick
//!
//! One call advances the run by one step. Within a step the order is fixed:
//! scroll, physics integration, timeline extension, obstacle motion, collision
//! resolution, then scoring.

use super::collision::{self, CollisionEvent};
use super::generator::generate_chunk;
use super::player::FlightInput;
use super::score::collect_passes;
use super::state::{
    DeathCause, GameEvent, GamePhase, GameState, ObstacleKind, PlayerMode, Support,
};
use crate::consts::*;

/// World x where an endless run's first chunk starts
const OPENING_RUNWAY: f32 = 500.0;
/// Autopilot jumps when a hazard is this many ticks of travel ahead
const AUTOPILOT_LEAD_TICKS: f32 = 6.0;
/// Elevation the autopilot holds a rocket at
const AUTOPILOT_CRUISE: f32 = 110.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump pressed this tick
    pub jump: bool,
    /// Input held down (rocket thrust)
    pub held: bool,
    /// Demo mode - the game plays itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    match state.phase {
        GamePhase::Menu | GamePhase::GameOver => return,
        GamePhase::GeneratingLevel => {
            let chunk = generate_chunk(OPENING_RUNWAY, CHUNK_SIZE, &mut state.rng);
            state.timeline.extend(chunk);
            let frontier = state.timeline.frontier();
            log::info!("Opening chunk ready, frontier at {frontier:.0}");
            state.events.push(GameEvent::ChunkGenerated {
                beats: CHUNK_SIZE,
                frontier,
            });
            state.phase = GamePhase::Playing;
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    let step = dt / SIM_DT;

    let input = if input.autopilot {
        autopilot(state)
    } else {
        FlightInput {
            jump: input.jump,
            held: input.held,
        }
    };

    state.distance += state.speed() * step;

    // Physics
    let previous_support = state.player.support;
    let player_x = state.player_world_x();
    let floor_supported = !state.timeline.gap_under(player_x, player_x + PLAYER_SIZE);
    if state.player.advance(step, input, floor_supported) {
        state.events.push(GameEvent::Jumped);
    }
    if previous_support == Support::Air && state.player.support == Support::Floor {
        state.events.push(GameEvent::Landed { obstacle: None });
    }

    extend_timeline(state);

    // Collisions see this tick's positions
    state.timeline.update_motion(state.time_ticks);
    let outcome = collision::resolve(
        &mut state.player,
        &mut state.timeline,
        state.distance,
        previous_support,
        &mut state.pickup_armed,
    );

    let cause = match outcome.killer {
        Some((id, kind)) => Some(DeathCause::Obstacle { id, kind }),
        None if state.player.has_fallen() => Some(DeathCause::Fell),
        None => None,
    };

    if let Some(cause) = cause {
        state.player.alive = false;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Run over at distance {:.0}, score {} ({:?})",
            state.distance,
            state.score(),
            cause
        );
        state.events.push(GameEvent::Died { cause });
        return;
    }

    for event in outcome.events {
        match event {
            CollisionEvent::Landed { id } => {
                state.events.push(GameEvent::Landed { obstacle: Some(id) });
            }
            CollisionEvent::CoinCollected { id } => {
                award(state, COIN_SCORE);
                state.events.push(GameEvent::CoinCollected {
                    id,
                    points: COIN_SCORE,
                });
            }
            CollisionEvent::PickupArmed { id } => {
                state.events.push(GameEvent::PickupArmed { id });
            }
            CollisionEvent::ModeToggled { mode, .. } => {
                state.events.push(GameEvent::ModeChanged { mode });
            }
        }
    }

    let player_left = state.player_world_x();
    for id in collect_passes(state.timeline.obstacles_mut(), player_left) {
        award(state, PASS_SCORE);
        state.events.push(GameEvent::ObstaclePassed {
            id,
            points: PASS_SCORE,
        });
    }
}

fn award(state: &mut GameState, points: u64) {
    if let Some(speed) = state.scoring.award(points) {
        state.events.push(GameEvent::SpeedUp { speed });
    }
}

/// Generate the next chunk when the frontier gets close, and drop what
/// scrolled far off the left edge
fn extend_timeline(state: &mut GameState) {
    let player_x = state.player_world_x();
    let frontier = state.timeline.frontier();

    if frontier - player_x < LOOKAHEAD_DISTANCE {
        let start = frontier.max(player_x);
        let chunk = generate_chunk(start, CHUNK_SIZE, &mut state.rng);
        state.timeline.extend(chunk);
        let frontier = state.timeline.frontier();
        log::debug!("Generated chunk, frontier now {frontier:.0}");
        state.events.push(GameEvent::ChunkGenerated {
            beats: CHUNK_SIZE,
            frontier,
        });
    }

    let pruned = state.timeline.prune_before(player_x - PRUNE_DISTANCE);
    if pruned > 0 {
        log::trace!("Pruned {pruned} obstacles");
    }
}

/// Demo input: hop over anything that would hit a grounded cube, keep a
/// rocket cruising above the floor
fn autopilot(state: &GameState) -> FlightInput {
    let player_right = state.player_world_x() + PLAYER_SIZE;

    match state.player.mode {
        PlayerMode::Cube => {
            let lead = state.speed() * AUTOPILOT_LEAD_TICKS;
            let window = state.timeline.window(player_right, player_right + lead);
            let threat = state.timeline.obstacles()[window].iter().any(|o| {
                let blocking = o.kind.is_lethal()
                    || o.kind.is_solid()
                    || (o.kind == ObstacleKind::FireRing && !o.collected);
                blocking && o.x >= player_right && o.elevation < PLAYER_SIZE
            });
            FlightInput {
                jump: threat,
                held: threat,
            }
        }
        PlayerMode::Rocket => {
            let cruise_y = crate::elevation_to_screen_y(AUTOPILOT_CRUISE);
            FlightInput {
                jump: false,
                held: state.player.bottom() > cruise_y,
            }
        }
    }
}
