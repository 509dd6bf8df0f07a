//! Authored level for normal mode

use super::state::Obstacle;

/// The hand-built opening level, in authoring order
pub fn default_level() -> Vec<Obstacle> {
    use Obstacle as O;

    vec![
        // Intro
        O::spike(500.0, 0.0),
        O::spike(800.0, 0.0),
        O::block(1100.0, 0.0),
        O::coin(1400.0, 50.0),
        O::moving_spike(1500.0, 0.0),
        // Rhythm section
        O::spike(2000.0, 0.0),
        O::spike(2300.0, 0.0),
        O::block(2600.0, 0.0),
        O::spike(2900.0, 0.0),
        O::block(3200.0, 0.0),
        O::coin(3350.0, 80.0),
        // Ring intro
        O::rocket_pickup(3250.0, 50.0),
        O::fire_ring(3500.0, 60.0),
        // Stairs
        O::block(3600.0, 0.0),
        O::block(3850.0, 40.0),
        O::block(4100.0, 80.0),
        O::spike(4300.0, 0.0),
        // Drop
        O::spike(4600.0, 0.0),
        O::spike(4635.0, 0.0),
        O::spike(4670.0, 0.0),
        O::block(5000.0, 0.0),
        O::moving_spike(5300.0, 0.0),
        O::block(5500.0, 40.0),
        O::block(5700.0, 40.0),
        O::coin(5900.0, 80.0),
        // Spinning blade intro
        O::spinning_blade(6200.0, 50.0),
        // Ring challenge
        O::rocket_pickup(6400.0, 50.0),
        O::fire_ring(6700.0, 70.0),
        O::rocket_pickup(6780.0, 50.0),
        O::fire_ring(7050.0, 70.0),
        // Endurance
        O::spike(7300.0, 0.0),
        O::block(7600.0, 0.0),
        O::spike(7900.0, 0.0),
        O::spike(8000.0, 0.0),
        O::block(8300.0, 0.0),
        // Climax
        O::spike(8600.0, 0.0),
        O::spike(8635.0, 0.0),
        O::spike(8670.0, 0.0),
        O::block(9000.0, 40.0),
        O::block(9300.0, 80.0),
        O::block(9600.0, 40.0),
        O::block(9900.0, 0.0),
        // Moving platforms
        O::moving_platform(10200.0, 40.0),
        O::moving_platform(10450.0, 80.0),
        O::moving_platform(10700.0, 40.0),
        O::coin(10850.0, 150.0),
        O::spike(11000.0, 0.0),
        O::spike(11035.0, 0.0),
        // Ring gauntlet
        O::rocket_pickup(11300.0, 50.0),
        O::fire_ring(11500.0, 60.0),
        O::fire_ring(11800.0, 100.0),
        O::fire_ring(12100.0, 40.0),
        O::fire_ring(12400.0, 80.0),
        // Final stretch
        O::spike(12800.0, 0.0),
        O::block(13000.0, 50.0),
        O::moving_platform(13200.0, 100.0),
        O::spike(13500.0, 0.0),
        O::spike(13535.0, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_OBSTACLE_WIDTH;
    use crate::sim::state::ObstacleKind;

    #[test]
    fn test_level_shape() {
        let level = default_level();
        assert_eq!(level.len(), 58);
        assert!(level.iter().all(|o| o.width > 0.0 && o.height > 0.0));
        assert!(level.iter().all(|o| o.width <= MAX_OBSTACLE_WIDTH));
        assert!(level.iter().all(|o| o.id == 0 && !o.passed && !o.collected));
    }

    #[test]
    fn test_only_moving_kinds_oscillate() {
        for obstacle in default_level() {
            let moving = matches!(
                obstacle.kind,
                ObstacleKind::SpinningBlade(_)
                    | ObstacleKind::MovingSpike(_)
                    | ObstacleKind::MovingPlatform(_)
            );
            assert_eq!(obstacle.kind.oscillation().is_some(), moving);
            if let Some(osc) = obstacle.kind.oscillation() {
                assert_eq!(osc.center, obstacle.elevation);
            }
        }
    }

    #[test]
    fn test_pickups_lead_the_rings() {
        let level = default_level();
        let pickups = level
            .iter()
            .filter(|o| o.kind == ObstacleKind::RocketPickup)
            .count();
        assert_eq!(pickups, 4);
        let first_ring = level
            .iter()
            .filter(|o| o.kind == ObstacleKind::FireRing)
            .map(|o| o.x)
            .fold(f32::MAX, f32::min);
        let first_pickup = level
            .iter()
            .filter(|o| o.kind == ObstacleKind::RocketPickup)
            .map(|o| o.x)
            .fold(f32::MAX, f32::min);
        assert!(first_pickup < first_ring);
    }
}
