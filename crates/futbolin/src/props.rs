//! Player-spawned props: loose balls and crates dropped onto the table.
//!
//! Props are a tagged kind, not a trait object. Only crates answer the
//! ray probe; loose balls report no hit. The registry is capped, with the
//! oldest prop despawned (body included) to make room, so sustained play
//! cannot exhaust the simulation.

use glam::Vec2;
use tilt_core::core::physics::{ColliderMaterial, RayHit};
use tilt_core::{EngineContext, Entity, EntityId};

const LOOSE_BALL_RADIUS: f32 = 15.0;
const CRATE_WIDTH: f32 = 100.0;
const CRATE_HEIGHT: f32 = 50.0;

// Irregular novelty prop outline, centered on its spawn point.
const BLOB_OUTLINE: [Vec2; 32] = [
    Vec2::new(-44.0, -38.0),
    Vec2::new(-16.0, -34.0),
    Vec2::new(-18.0, -74.0),
    Vec2::new(17.0, -44.0),
    Vec2::new(30.0, -70.0),
    Vec2::new(36.0, -35.0),
    Vec2::new(53.0, -38.0),
    Vec2::new(46.0, -16.0),
    Vec2::new(49.0, -12.0),
    Vec2::new(59.0, -7.0),
    Vec2::new(51.0, -1.0),
    Vec2::new(52.0, 11.0),
    Vec2::new(48.0, 17.0),
    Vec2::new(51.0, 25.0),
    Vec2::new(45.0, 30.0),
    Vec2::new(42.0, 41.0),
    Vec2::new(48.0, 47.0),
    Vec2::new(45.0, 51.0),
    Vec2::new(40.0, 52.0),
    Vec2::new(37.0, 63.0),
    Vec2::new(25.0, 73.0),
    Vec2::new(9.0, 73.0),
    Vec2::new(-5.0, 66.0),
    Vec2::new(-12.0, 58.0),
    Vec2::new(-24.0, 62.0),
    Vec2::new(-20.0, 52.0),
    Vec2::new(-35.0, 49.0),
    Vec2::new(-28.0, 40.0),
    Vec2::new(-48.0, 28.0),
    Vec2::new(-29.0, 16.0),
    Vec2::new(-58.0, 1.0),
    Vec2::new(-28.0, -12.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
    LooseBall,
    Crate,
    /// Irregular outline, simulated as its convex hull.
    Blob,
}

pub struct Props {
    spawned: Vec<(EntityId, PropKind)>,
    cap: usize,
}

impl Props {
    pub fn new(cap: usize) -> Self {
        Self {
            spawned: Vec::new(),
            cap: cap.max(1),
        }
    }

    /// Drop a new prop at the pointer position. Evicts the oldest spawned
    /// prop first when at the cap.
    pub fn spawn(&mut self, ctx: &mut EngineContext, kind: PropKind, pos: Vec2) -> EntityId {
        if self.spawned.len() >= self.cap {
            let (oldest, _) = self.spawned.remove(0);
            ctx.despawn(oldest);
        }

        let id = ctx.next_id();
        let (entity, desc) = match kind {
            PropKind::LooseBall => {
                let entity = Entity::new(id)
                    .with_tag("prop-ball")
                    .with_pos(pos)
                    .with_scale(Vec2::splat(LOOSE_BALL_RADIUS * 2.0));
                let desc = tilt_core::BodyDesc::dynamic(tilt_core::ShapeDesc::Circle {
                    radius: LOOSE_BALL_RADIUS,
                })
                .with_position(pos);
                (entity, desc)
            }
            PropKind::Crate => {
                let entity = Entity::new(id)
                    .with_tag("prop-crate")
                    .with_pos(pos)
                    .with_scale(Vec2::new(CRATE_WIDTH, CRATE_HEIGHT));
                let desc = tilt_core::BodyDesc::dynamic(tilt_core::ShapeDesc::Rectangle {
                    width: CRATE_WIDTH,
                    height: CRATE_HEIGHT,
                })
                .with_position(pos);
                (entity, desc)
            }
            PropKind::Blob => {
                let entity = Entity::new(id)
                    .with_tag("prop-blob")
                    .with_pos(pos)
                    .with_scale(Vec2::new(117.0, 147.0));
                let desc = tilt_core::BodyDesc::dynamic(tilt_core::ShapeDesc::Polygon {
                    vertices: BLOB_OUTLINE.to_vec(),
                })
                .with_position(pos);
                (entity, desc)
            }
        };
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());
        self.spawned.push((id, kind));
        id
    }

    /// Remove one prop explicitly.
    pub fn despawn(&mut self, ctx: &mut EngineContext, id: EntityId) {
        if let Some(idx) = self.spawned.iter().position(|(pid, _)| *pid == id) {
            self.spawned.remove(idx);
            ctx.despawn(id);
        }
    }

    /// Probe the ray against spawned props. Only a crate reports a hit;
    /// any other intersection (walls, paddles, loose balls) is treated
    /// as no hit, matching the kinds' probe capabilities.
    pub fn ray_hit(&self, ctx: &mut EngineContext, from: Vec2, to: Vec2) -> Option<RayHit> {
        let hit = ctx.physics.cast_ray(from, to)?;
        let kind = self
            .spawned
            .iter()
            .find(|(id, _)| *id == hit.owner)
            .map(|(_, kind)| *kind)?;
        (kind == PropKind::Crate).then_some(hit)
    }

    pub fn kind_of(&self, id: EntityId) -> Option<PropKind> {
        self.spawned
            .iter()
            .find(|(pid, _)| *pid == id)
            .map(|(_, kind)| *kind)
    }

    pub fn len(&self) -> usize {
        self.spawned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawned.is_empty()
    }
}
