//! Obstacle timeline
//!
//! The run's obstacles, kept sorted by world x so the collision resolver can
//! look at a bounded window instead of the whole list.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::state::{Obstacle, ObstacleKind};
use crate::consts::MAX_OBSTACLE_WIDTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timeline {
    obstacles: Vec<Obstacle>,
    /// Next obstacle ID
    next_id: u32,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            obstacles: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a timeline from an authored list
    pub fn from_obstacles(obstacles: Vec<Obstacle>) -> Self {
        let mut timeline = Self::new();
        timeline.extend(obstacles);
        timeline
    }

    /// Append obstacles, assigning IDs in the given order
    pub fn extend(&mut self, obstacles: Vec<Obstacle>) {
        for mut obstacle in obstacles {
            obstacle.id = self.next_id;
            self.next_id += 1;
            self.obstacles.push(obstacle);
        }
        self.normalize_order();
    }

    /// Stable sort by x; equal x keeps insertion order
    fn normalize_order(&mut self) {
        self.obstacles.sort_by(|a, b| a.x.total_cmp(&b.x));
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn get(&self, id: u32) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    /// Right edge of the furthest obstacle (0 when empty)
    pub fn frontier(&self) -> f32 {
        self.obstacles
            .iter()
            .map(Obstacle::right)
            .fold(0.0, f32::max)
    }

    /// Indices of obstacles that may reach into `[min_x, max_x]`
    ///
    /// Relies on x-ordering and on no obstacle being wider than
    /// `MAX_OBSTACLE_WIDTH`.
    pub fn window(&self, min_x: f32, max_x: f32) -> Range<usize> {
        let start = self
            .obstacles
            .partition_point(|o| o.x + MAX_OBSTACLE_WIDTH < min_x);
        let end = self.obstacles.partition_point(|o| o.x <= max_x);
        start..end.max(start)
    }

    /// Whether a floor gap covers any part of `[min_x, max_x]`
    pub fn gap_under(&self, min_x: f32, max_x: f32) -> bool {
        self.obstacles[self.window(min_x, max_x)].iter().any(|o| {
            matches!(o.kind, ObstacleKind::FloorGap) && o.x < max_x && o.right() > min_x
        })
    }

    /// Refresh live positions of oscillating obstacles
    pub fn update_motion(&mut self, ticks: u64) {
        for obstacle in &mut self.obstacles {
            obstacle.update_motion(ticks);
        }
    }

    /// Drop obstacles whose right edge is left of `x`; returns how many went
    pub fn prune_before(&mut self, x: f32) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.right() >= x);
        before - self.obstacles.len()
    }
}
