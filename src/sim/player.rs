//! Player physics body
//!
//! Vertical motion only; the world scrolls past the fixed screen x.

use super::state::{PlayerMode, PlayerState, Support};
use crate::consts::*;

/// Player input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlightInput {
    /// Jump pressed this tick
    pub jump: bool,
    /// Input held down (rocket thrust)
    pub held: bool,
}

impl PlayerState {
    /// Start a jump if standing on something. No double jumps, and rockets
    /// fly instead of jumping.
    pub fn jump(&mut self) -> bool {
        if self.mode != PlayerMode::Cube || !self.is_grounded() {
            return false;
        }
        self.vel_y = JUMP_FORCE;
        self.support = Support::Air;
        true
    }

    /// Integrate one step. `dt` is in ticks (1.0 = one fixed step).
    ///
    /// `floor_supported` is false while the body is over a floor gap.
    /// Returns true if a jump started this step.
    pub fn advance(&mut self, dt: f32, input: FlightInput, floor_supported: bool) -> bool {
        self.prev_y = self.pos.y;

        let jumped = input.jump && self.jump();

        match self.mode {
            PlayerMode::Cube => {
                self.vel_y = (self.vel_y + GRAVITY * dt)
                    .clamp(-TERMINAL_VELOCITY, TERMINAL_VELOCITY);
            }
            PlayerMode::Rocket => {
                let accel = if input.held || input.jump {
                    -ROCKET_THRUST
                } else {
                    ROCKET_GRAVITY
                };
                self.vel_y =
                    (self.vel_y + accel * dt).clamp(-ROCKET_MAX_SPEED, ROCKET_MAX_SPEED);
            }
        }

        // Supports are re-established by the floor clamp or the collision resolver
        self.support = Support::Air;
        self.pos.y += self.vel_y * dt;

        if self.mode == PlayerMode::Rocket && self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel_y = self.vel_y.max(0.0);
        }

        // Only catch bodies arriving from above; one that already sank into a
        // gap keeps falling
        let ground = PlayerState::ground_y();
        if floor_supported && self.pos.y >= ground && self.prev_y <= ground + LANDING_TOLERANCE {
            self.pos.y = ground;
            self.vel_y = 0.0;
            self.support = Support::Floor;
        }

        jumped
    }

    /// Dropped below the bottom of the screen
    pub fn has_fallen(&self) -> bool {
        self.pos.y > CANVAS_HEIGHT
    }
}
