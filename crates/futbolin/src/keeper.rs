//! The keeper: a kinematic blocker sweeping across the goal mouth.
//!
//! Pure oscillator — position plus a direction flag, no velocity state.
//! Speed scales with the score through the same multiplier as the ball,
//! and the physics body is repositioned every frame so collision and
//! visual position never diverge by more than one frame.

use glam::Vec2;
use tilt_core::core::physics::{PhysicsBody, PhysicsWorld};

use crate::difficulty::capped_multiplier;

#[derive(Debug, Clone)]
pub struct Keeper {
    /// Center x-position, pixels.
    pub x: f32,
    /// Fixed y lane.
    pub y: f32,
    /// +1 moving right, -1 moving left.
    dir: f32,
    /// Sweep speed at score 0, pixels per frame.
    base_speed: f32,
    /// Leftmost allowed x for the blocker's leading edge.
    goal_left: f32,
    /// Rightmost allowed x.
    goal_right: f32,
    half_width: f32,
}

impl Keeper {
    pub fn new(start: Vec2, base_speed: f32, goal_left: f32, goal_right: f32, width: f32) -> Self {
        Self {
            x: start.x,
            y: start.y,
            dir: 1.0,
            base_speed,
            goal_left,
            goal_right,
            half_width: width / 2.0,
        }
    }

    /// Advance one frame at the given score, bouncing off the goal posts.
    /// The position is clamped on reversal so the blocker never overshoots
    /// the mouth by more than one frame's travel.
    pub fn advance(&mut self, score: i32, cap: Option<f32>) {
        let speed = self.base_speed * capped_multiplier(score, cap);
        self.x += speed * self.dir;

        if self.dir > 0.0 && self.x + self.half_width >= self.goal_right {
            self.x = self.goal_right - self.half_width;
            self.dir = -1.0;
        } else if self.dir < 0.0 && self.x - self.half_width <= self.goal_left {
            self.x = self.goal_left + self.half_width;
            self.dir = 1.0;
        }
    }

    /// Mirror the current position into the kinematic physics body.
    pub fn mirror(&self, physics: &mut PhysicsWorld, body: &PhysicsBody) {
        physics.set_kinematic_position(body, Vec2::new(self.x, self.y), 0.0);
    }
}
