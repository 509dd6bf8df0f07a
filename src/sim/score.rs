//! Score and speed progression
//!
//! Speed is a step function of the score band: every multiple of
//! `SCORE_THRESHOLD_FOR_SPEED` crossed adds one step, capped at `MAX_SPEED`.

use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreController {
    score: u64,
    speed: f32,
    /// Threshold bands already paid out as speed steps
    bands: u64,
}

impl Default for ScoreController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreController {
    pub fn new() -> Self {
        Self {
            score: 0,
            speed: BASE_SPEED,
            bands: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// World scroll speed in px/tick
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Add points; returns the new speed if a threshold was crossed
    pub fn award(&mut self, points: u64) -> Option<f32> {
        self.score = self.score.saturating_add(points);

        let bands = self.score / SCORE_THRESHOLD_FOR_SPEED;
        if bands <= self.bands {
            return None;
        }

        let steps = bands - self.bands;
        self.bands = bands;
        let speed = (self.speed + SPEED_STEP_INCREASE * steps as f32).min(MAX_SPEED);
        if speed > self.speed {
            self.speed = speed;
            log::info!("Speed up: {:.1} at score {}", speed, self.score);
            Some(speed)
        } else {
            None
        }
    }
}

/// Mark hazards whose right edge the player's left edge has moved past.
/// Returns the ids newly passed, each exactly once per obstacle.
pub fn collect_passes(obstacles: &mut [Obstacle], player_left: f32) -> Vec<u32> {
    let mut passed = Vec::new();
    for obstacle in obstacles.iter_mut() {
        if obstacle.x > player_left {
            break;
        }
        if !obstacle.passed && obstacle.kind.counts_for_pass() && obstacle.right() < player_left {
            obstacle.passed = true;
            passed.push(obstacle.id);
        }
    }
    passed
}
