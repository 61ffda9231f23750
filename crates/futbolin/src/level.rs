//! Table construction: static chain geometry, the three scoring sensors,
//! the paddles, the keeper and the match ball.
//!
//! Geometry is compiled-in pixel coordinate lists, converted once at
//! creation. The playfield is an 800x600 screen with the table occupying
//! roughly x 240..558, y 10..478; the goal mouth opens at the top and the
//! defended goal box sits at the bottom center.

use glam::Vec2;
use tilt_core::core::physics::{ColliderMaterial, ShapeDesc};
use tilt_core::{BodyDesc, EngineContext, Entity, EntityId};

use crate::keeper::Keeper;
use crate::paddles::Paddles;
use crate::state::SensorMap;
use crate::tuning::Tuning;

pub const WORLD_WIDTH: f32 = 800.0;
pub const WORLD_HEIGHT: f32 = 600.0;

pub const BALL_RADIUS: f32 = 15.0;

/// Fixed relaunch points, one per side of the goal mouth.
pub const SPAWN_LEFT: Vec2 = Vec2::new(330.0, 90.0);
pub const SPAWN_RIGHT: Vec2 = Vec2::new(470.0, 90.0);
/// Table center line; the lateral push on relaunch aims at this.
pub const CENTER_X: f32 = 400.0;

const PADDLE_PIVOT_LEFT: Vec2 = Vec2::new(340.0, 395.0);
const PADDLE_PIVOT_RIGHT: Vec2 = Vec2::new(460.0, 395.0);

// Keeper lane across the goal mouth.
const KEEPER_START: Vec2 = Vec2::new(400.0, 50.0);
const KEEPER_WIDTH: f32 = 40.0;
const KEEPER_HEIGHT: f32 = 12.0;
const GOAL_LEFT: f32 = 300.0;
const GOAL_RIGHT: f32 = 500.0;

// Left inner rail, hugging the ball lane down to the left paddle.
const RAIL_LEFT: [Vec2; 10] = [
    Vec2::new(274.0, 121.0),
    Vec2::new(303.0, 142.0),
    Vec2::new(303.0, 340.0),
    Vec2::new(340.0, 383.0),
    Vec2::new(331.0, 398.0),
    Vec2::new(291.0, 354.0),
    Vec2::new(289.0, 154.0),
    Vec2::new(267.0, 140.0),
    Vec2::new(266.0, 127.0),
    Vec2::new(273.0, 121.0),
];

// Right inner rail, mirror of the left.
const RAIL_RIGHT: [Vec2; 10] = [
    Vec2::new(527.0, 121.0),
    Vec2::new(529.0, 140.0),
    Vec2::new(507.0, 152.0),
    Vec2::new(507.0, 349.0),
    Vec2::new(468.0, 397.0),
    Vec2::new(460.0, 391.0),
    Vec2::new(457.0, 383.0),
    Vec2::new(493.0, 337.0),
    Vec2::new(491.0, 142.0),
    Vec2::new(526.0, 121.0),
];

// Outer table wall, with the goal mouth opening at the top.
const WALL_OUTER: [Vec2; 18] = [
    Vec2::new(500.0, 35.0),
    Vec2::new(512.0, 17.0),
    Vec2::new(511.0, 10.0),
    Vec2::new(287.0, 10.0),
    Vec2::new(286.0, 15.0),
    Vec2::new(296.0, 34.0),
    Vec2::new(275.0, 35.0),
    Vec2::new(253.0, 47.0),
    Vec2::new(246.0, 55.0),
    Vec2::new(240.0, 70.0),
    Vec2::new(240.0, 478.0),
    Vec2::new(558.0, 478.0),
    Vec2::new(558.0, 118.0),
    Vec2::new(558.0, 71.0),
    Vec2::new(548.0, 53.0),
    Vec2::new(535.0, 41.0),
    Vec2::new(521.0, 36.0),
    Vec2::new(501.0, 35.0),
];

// Inner table wall, inset from the outer.
const WALL_INNER: [Vec2; 17] = [
    Vec2::new(489.0, 47.0),
    Vec2::new(490.0, 37.0),
    Vec2::new(498.0, 19.0),
    Vec2::new(301.0, 20.0),
    Vec2::new(309.0, 37.0),
    Vec2::new(311.0, 47.0),
    Vec2::new(277.0, 47.0),
    Vec2::new(264.0, 53.0),
    Vec2::new(255.0, 59.0),
    Vec2::new(246.0, 74.0),
    Vec2::new(247.0, 461.0),
    Vec2::new(551.0, 463.0),
    Vec2::new(551.0, 82.0),
    Vec2::new(546.0, 67.0),
    Vec2::new(537.0, 55.0),
    Vec2::new(521.0, 48.0),
    Vec2::new(490.0, 47.0),
];

// The defended goal box at the bottom center.
const GOAL_BOX: [Vec2; 5] = [
    Vec2::new(388.0, 441.0),
    Vec2::new(411.0, 441.0),
    Vec2::new(412.0, 458.0),
    Vec2::new(387.0, 458.0),
    Vec2::new(387.0, 441.0),
];

/// Everything the frame loop needs a handle on after construction.
pub struct Level {
    pub ball: EntityId,
    pub sensors: SensorMap,
    pub paddles: Paddles,
    pub keeper: Keeper,
    pub keeper_id: EntityId,
}

impl Level {
    /// Build the full table into the context. Chains are static, sensors
    /// never collide, the keeper is kinematic, the ball gets continuous
    /// collision detection so it cannot tunnel through the thin sensors.
    pub fn build(ctx: &mut EngineContext, tuning: &Tuning) -> Self {
        for chain in [
            &RAIL_LEFT[..],
            &RAIL_RIGHT[..],
            &WALL_OUTER[..],
            &WALL_INNER[..],
            &GOAL_BOX[..],
        ] {
            let id = ctx.next_id();
            ctx.physics.create_chain(id, 0.0, 0.0, chain);
        }

        let goal = ctx.next_id();
        ctx.physics
            .create_rectangle_sensor(goal, CENTER_X, 20.0, 190.0, 16.0);

        // The zone reaches above the box mouth (y 441): the ball is wider
        // than the mouth, so it must trip the sensor from the outside
        // rather than by sinking into the box walls.
        let own_goal = ctx.next_id();
        ctx.physics
            .create_rectangle_sensor(own_goal, CENTER_X, 445.0, 24.0, 30.0);

        let drop = ctx.next_id();
        ctx.physics.create_rectangle_sensor(
            drop,
            WORLD_WIDTH / 2.0,
            WORLD_HEIGHT,
            WORLD_WIDTH,
            50.0,
        );

        let paddles = Paddles::build(ctx, PADDLE_PIVOT_LEFT, PADDLE_PIVOT_RIGHT);

        let keeper_id = ctx.next_id();
        let keeper_desc = BodyDesc::kinematic(ShapeDesc::Rectangle {
            width: KEEPER_WIDTH,
            height: KEEPER_HEIGHT,
        })
        .with_position(KEEPER_START);
        let keeper_entity = Entity::new(keeper_id)
            .with_tag("keeper")
            .with_pos(KEEPER_START)
            .with_scale(Vec2::new(KEEPER_WIDTH, KEEPER_HEIGHT));
        ctx.spawn_with_body(keeper_entity, keeper_desc, ColliderMaterial::default());
        let keeper = Keeper::new(
            KEEPER_START,
            tuning.base_keeper_speed,
            GOAL_LEFT,
            GOAL_RIGHT,
            KEEPER_WIDTH,
        );

        let ball = ctx.next_id();
        let ball_desc = BodyDesc::dynamic(ShapeDesc::Circle {
            radius: BALL_RADIUS,
        })
        .with_position(SPAWN_LEFT)
        .with_ccd(true);
        let ball_entity = Entity::new(ball)
            .with_tag("ball")
            .with_pos(SPAWN_LEFT)
            .with_scale(Vec2::splat(BALL_RADIUS * 2.0));
        ctx.spawn_with_body(
            ball_entity,
            ball_desc,
            ColliderMaterial {
                restitution: 0.5,
                ..ColliderMaterial::default()
            },
        );

        Self {
            ball,
            sensors: SensorMap {
                ball,
                goal,
                own_goal,
                drop,
            },
            paddles,
            keeper,
            keeper_id,
        }
    }

    /// Fixed spawn point for a relaunch side.
    pub fn spawn_point(left_side: bool) -> Vec2 {
        if left_side {
            SPAWN_LEFT
        } else {
            SPAWN_RIGHT
        }
    }
}
