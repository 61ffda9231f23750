//! Paddle actuation: two motorized revolute joints driven by held keys.
//!
//! The controller is stateless. Every frame it writes a motor speed from
//! the current input sample (level-triggered, no debouncing); the angular
//! limits live in the joints themselves, enforced by the simulator.

use std::f32::consts::PI;

use glam::Vec2;
use tilt_core::core::physics::{ColliderMaterial, JointHandle, PhysicsWorld, ShapeDesc};
use tilt_core::{BodyDesc, EngineContext, Entity};

/// Striking speed while the key is held, radians/second.
const STRIKE_SPEED: f32 = 20.0;
/// Return speed while the key is released.
const RETURN_SPEED: f32 = 10.0;
/// Motor torque cap.
const MOTOR_TORQUE: f32 = 1000.0;

/// Left paddle swings counter-clockwise to strike.
const LEFT_LIMITS: [f32; 2] = [-0.25 * PI, 0.20 * PI];
/// Right paddle is the mirror image.
const RIGHT_LIMITS: [f32; 2] = [-0.20 * PI, 0.25 * PI];

const PADDLE_WIDTH: f32 = 50.0;
const PADDLE_HEIGHT: f32 = 10.0;
const PIVOT_SIZE: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Motor speed policy for one paddle. Positive is clockwise.
pub fn motor_speed(side: Side, held: bool) -> f32 {
    match (side, held) {
        (Side::Left, true) => -STRIKE_SPEED,
        (Side::Left, false) => RETURN_SPEED,
        (Side::Right, true) => STRIKE_SPEED,
        (Side::Right, false) => -RETURN_SPEED,
    }
}

/// The two paddle joints. Handles are optional so a failed setup degrades
/// to inert paddles instead of aborting the session.
pub struct Paddles {
    left: Option<JointHandle>,
    right: Option<JointHandle>,
}

impl Paddles {
    /// Build both paddles: a static pivot, a dynamic blade, and a limited
    /// motorized revolute joint per side, at the given pivot positions.
    pub fn build(ctx: &mut EngineContext, left_pivot: Vec2, right_pivot: Vec2) -> Self {
        let left = Self::build_one(ctx, left_pivot, Side::Left);
        let right = Self::build_one(ctx, right_pivot, Side::Right);
        Self { left, right }
    }

    fn build_one(ctx: &mut EngineContext, pivot_pos: Vec2, side: Side) -> Option<JointHandle> {
        let pivot_id = ctx.next_id();
        let pivot = ctx.physics.create_static_rectangle(
            pivot_id,
            pivot_pos.x,
            pivot_pos.y,
            PIVOT_SIZE,
            PIVOT_SIZE,
        );

        let blade_id = ctx.next_id();
        let tag = match side {
            Side::Left => "paddle-left",
            Side::Right => "paddle-right",
        };
        let desc = BodyDesc::dynamic(ShapeDesc::Rectangle {
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
        })
        .with_position(pivot_pos);
        let entity = Entity::new(blade_id)
            .with_tag(tag)
            .with_pos(pivot_pos)
            .with_scale(Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT));
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        let blade = ctx.scene.get(blade_id).and_then(|e| e.body);
        match blade {
            Some(blade) => {
                let limits = match side {
                    Side::Left => LEFT_LIMITS,
                    Side::Right => RIGHT_LIMITS,
                };
                Some(
                    ctx.physics
                        .create_revolute_joint(&pivot, &blade, limits, MOTOR_TORQUE),
                )
            }
            None => {
                log::warn!("paddle blade missing, {:?} paddle will be inert", side);
                None
            }
        }
    }

    /// Write this frame's motor speeds from the sampled key state.
    pub fn apply_input(&self, physics: &mut PhysicsWorld, left_held: bool, right_held: bool) {
        if let Some(joint) = self.left {
            physics.set_motor_speed(joint, motor_speed(Side::Left, left_held));
        }
        if let Some(joint) = self.right {
            physics.set_motor_speed(joint, motor_speed(Side::Right, right_held));
        }
    }
}
