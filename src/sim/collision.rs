//! Collision detection and response
//!
//! Tests the player box against the obstacles near its fixed screen x and
//! applies the response for each obstacle kind. Lethal contact wins over
//! everything else in the same tick: pending pickups are thrown away.

use super::state::{Aabb, ObstacleKind, PlayerMode, PlayerState, Support};
use super::timeline::Timeline;
use crate::consts::*;

/// Non-lethal outcome of a tick's contacts
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// Feet placed on a solid obstacle (first contact only)
    Landed { id: u32 },
    CoinCollected { id: u32 },
    PickupArmed { id: u32 },
    /// Entered a fire ring with an armed pickup
    ModeToggled { id: u32, mode: PlayerMode },
}

/// Result of a collision check
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// The run ends this tick
    pub lethal: bool,
    /// Obstacle that killed the player
    pub killer: Option<(u32, ObstacleKind)>,
    pub events: Vec<CollisionEvent>,
}

impl CollisionOutcome {
    fn killed_by(id: u32, kind: ObstacleKind) -> Self {
        Self {
            lethal: true,
            killer: Some((id, kind)),
            events: Vec::new(),
        }
    }
}

/// Side effects held back until the tick is known to be survivable
enum Pending {
    Collect(usize),
    Arm(usize),
    Toggle(usize),
}

/// Candidate window for a player box, in world x
pub fn candidate_range(player_box: &Aabb) -> (f32, f32) {
    (
        player_box.min.x - COLLISION_MARGIN,
        player_box.max.x + COLLISION_MARGIN,
    )
}

/// Try to put the player on top of `surface`. Only works when coming down
/// onto it from above.
fn try_land(player: &mut PlayerState, surface: &Aabb, id: u32) -> bool {
    if player.vel_y < 0.0 || player.prev_bottom() > surface.top() + LANDING_TOLERANCE {
        return false;
    }
    player.stand_on(surface.top(), Support::Obstacle(id));
    true
}

/// Resolve the player against the timeline for one tick
///
/// `previous_support` is what the player stood on before this tick's physics
/// step. A player riding a solid obstacle is kept on its live top, so moving
/// platforms carry the player with them.
pub fn resolve(
    player: &mut PlayerState,
    timeline: &mut Timeline,
    distance: f32,
    previous_support: Support,
    pickup_armed: &mut bool,
) -> CollisionOutcome {
    let (min_x, max_x) = candidate_range(&player.bounds(distance));
    let window = timeline.window(min_x, max_x);
    let obstacles = &mut timeline.obstacles_mut()[window];

    // Keep riders attached while they stay over their support and didn't jump
    if let Support::Obstacle(id) = previous_support {
        let surface = obstacles.iter().find(|o| o.id == id).map(|o| o.bounds());
        if let Some(surface) = surface {
            if player.vel_y >= 0.0 && player.bounds(distance).overlaps_x(&surface) {
                player.stand_on(surface.top(), Support::Obstacle(id));
            }
        }
    }

    let mut events = Vec::new();
    let mut pending = Vec::new();
    let mut armed = *pickup_armed;

    for (idx, obstacle) in obstacles.iter().enumerate() {
        if obstacle.collected || matches!(obstacle.kind, ObstacleKind::FloorGap) {
            continue;
        }

        let surface = obstacle.bounds();
        if !player.bounds(distance).overlaps(&surface) {
            continue;
        }

        match obstacle.kind {
            ObstacleKind::Spike | ObstacleKind::MovingSpike(_) | ObstacleKind::SpinningBlade(_) => {
                log::debug!("Hit {} #{}", obstacle.kind.name(), obstacle.id);
                player.alive = false;
                return CollisionOutcome::killed_by(obstacle.id, obstacle.kind);
            }
            ObstacleKind::Coin => pending.push(Pending::Collect(idx)),
            ObstacleKind::RocketPickup => {
                armed = true;
                pending.push(Pending::Arm(idx));
            }
            ObstacleKind::FireRing if armed => {
                armed = false;
                pending.push(Pending::Toggle(idx));
            }
            ObstacleKind::Block | ObstacleKind::MovingPlatform(_) | ObstacleKind::FireRing => {
                let already_on = player.support == Support::Obstacle(obstacle.id);
                if try_land(player, &surface, obstacle.id) {
                    if !already_on && previous_support != Support::Obstacle(obstacle.id) {
                        events.push(CollisionEvent::Landed { id: obstacle.id });
                    }
                } else {
                    // Any contact that isn't a landing is fatal
                    log::debug!("Crashed into {} #{}", obstacle.kind.name(), obstacle.id);
                    player.alive = false;
                    return CollisionOutcome::killed_by(obstacle.id, obstacle.kind);
                }
            }
            ObstacleKind::FloorGap => {}
        }
    }

    for action in pending {
        match action {
            Pending::Collect(idx) => {
                obstacles[idx].collected = true;
                events.push(CollisionEvent::CoinCollected {
                    id: obstacles[idx].id,
                });
            }
            Pending::Arm(idx) => {
                obstacles[idx].collected = true;
                *pickup_armed = true;
                events.push(CollisionEvent::PickupArmed {
                    id: obstacles[idx].id,
                });
            }
            Pending::Toggle(idx) => {
                obstacles[idx].collected = true;
                *pickup_armed = false;
                player.mode = player.mode.toggled();
                if player.mode == PlayerMode::Rocket {
                    player.vel_y = player.vel_y.clamp(-ROCKET_MAX_SPEED, ROCKET_MAX_SPEED);
                }
                events.push(CollisionEvent::ModeToggled {
                    id: obstacles[idx].id,
                    mode: player.mode,
                });
            }
        }
    }

    CollisionOutcome {
        lethal: false,
        killer: None,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elevation_to_screen_y;
    use crate::sim::state::Obstacle;

    /// Timeline with the player's left edge at world x 0 (distance = -PLAYER_X)
    fn setup(obstacles: Vec<Obstacle>) -> (PlayerState, Timeline, f32) {
        (
            PlayerState::new(),
            Timeline::from_obstacles(obstacles),
            -PLAYER_X,
        )
    }

    /// Put the player's feet at `elevation`, last tick `drop` px higher
    fn place(player: &mut PlayerState, elevation: f32, drop: f32) {
        player.pos.y = elevation_to_screen_y(elevation) - PLAYER_SIZE;
        player.prev_y = player.pos.y - drop;
        player.vel_y = drop;
        player.support = Support::Air;
    }

    #[test]
    fn test_spike_is_lethal() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::spike(10.0, 0.0)]);
        place(&mut player, 10.0, 5.0);
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(outcome.lethal);
        assert_eq!(outcome.killer.map(|(id, _)| id), Some(1));
        assert!(!player.alive);
    }

    #[test]
    fn test_miss_is_harmless() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::spike(10.0, 0.0)]);
        // Clear above the spike
        place(&mut player, 31.0, 2.0);
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(!outcome.lethal);
        assert!(outcome.events.is_empty());
        assert!(player.alive);
    }

    #[test]
    fn test_land_on_block() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::block(10.0, 0.0)]);
        // Feet 3px into the block top, came down from above
        place(&mut player, 37.0, 4.0);
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(!outcome.lethal);
        assert_eq!(outcome.events, vec![CollisionEvent::Landed { id: 1 }]);
        assert_eq!(player.bottom(), elevation_to_screen_y(40.0));
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.support, Support::Obstacle(1));
    }

    #[test]
    fn test_block_side_hit_is_lethal() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::block(20.0, 0.0)]);
        // Running along the floor into the block face
        place(&mut player, 0.0, 0.0);
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Floor, &mut armed);
        assert!(outcome.lethal);
        assert!(!player.alive);
    }

    #[test]
    fn test_rising_into_block_is_lethal() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::block(10.0, 60.0)]);
        // Head bumps the underside while jumping
        player.pos.y = elevation_to_screen_y(60.0) - 5.0;
        player.prev_y = player.pos.y + 10.0;
        player.vel_y = -10.0;
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(outcome.lethal);
    }

    #[test]
    fn test_coin_collected_once() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::coin(5.0, 10.0)]);
        place(&mut player, 5.0, 1.0);
        let mut armed = false;

        let first = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert_eq!(first.events, vec![CollisionEvent::CoinCollected { id: 1 }]);
        assert!(timeline.obstacles()[0].collected);

        // Still overlapping next tick
        let second = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(second.events.is_empty());
        assert!(player.alive);
    }

    #[test]
    fn test_lethal_beats_collectible() {
        let (mut player, mut timeline, distance) = setup(vec![
            Obstacle::coin(0.0, 10.0),
            Obstacle::spike(20.0, 0.0),
        ]);
        place(&mut player, 10.0, 1.0);
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(outcome.lethal);
        assert!(outcome.events.is_empty());
        assert!(!timeline.obstacles()[0].collected);
    }

    #[test]
    fn test_pickup_then_ring_toggles_rocket() {
        let (mut player, mut timeline, distance) = setup(vec![
            Obstacle::rocket_pickup(0.0, 50.0),
            Obstacle::fire_ring(400.0, 70.0),
        ]);
        place(&mut player, 40.0, -2.0);
        player.vel_y = -2.0;
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert_eq!(outcome.events, vec![CollisionEvent::PickupArmed { id: 1 }]);
        assert!(armed);
        assert_eq!(player.mode, PlayerMode::Cube);

        // Fly into the ring further down the track
        let distance = distance + 400.0;
        place(&mut player, 90.0, -2.0);
        player.vel_y = -2.0;
        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(!outcome.lethal);
        assert_eq!(
            outcome.events,
            vec![CollisionEvent::ModeToggled {
                id: 2,
                mode: PlayerMode::Rocket
            }]
        );
        assert!(!armed);
        assert_eq!(player.mode, PlayerMode::Rocket);

        // The ring is spent; lingering inside it is harmless
        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(!outcome.lethal);
        assert_eq!(player.mode, PlayerMode::Rocket);
    }

    #[test]
    fn test_unarmed_ring_is_a_hazard() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::fire_ring(0.0, 70.0)]);
        place(&mut player, 90.0, -2.0);
        player.vel_y = -2.0;
        let mut armed = false;

        let outcome = resolve(&mut player, &mut timeline, distance, Support::Air, &mut armed);
        assert!(outcome.lethal);
    }

    #[test]
    fn test_platform_carries_rider() {
        let mut platform = Obstacle::moving_platform(0.0, 40.0);
        platform.elevation = 40.0;
        let (mut player, mut timeline, distance) = setup(vec![platform]);
        place(&mut player, 58.0, 1.6);
        let mut armed = false;

        // The platform rose 20px since the player last stood on it
        timeline.obstacles_mut()[0].elevation = 60.0;
        let outcome = resolve(
            &mut player,
            &mut timeline,
            distance,
            Support::Obstacle(1),
            &mut armed,
        );
        assert!(!outcome.lethal);
        assert!(outcome.events.is_empty());
        assert_eq!(player.bottom(), elevation_to_screen_y(80.0));
        assert_eq!(player.support, Support::Obstacle(1));
    }

    #[test]
    fn test_far_obstacles_ignored() {
        let (mut player, mut timeline, distance) = setup(vec![Obstacle::spike(
            PLAYER_SIZE + COLLISION_MARGIN + 1.0,
            0.0,
        )]);
        let mut armed = false;
        let outcome = resolve(&mut player, &mut timeline, distance, Support::Floor, &mut armed);
        assert!(!outcome.lethal);
    }
}
