use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::Mutex;

use crate::api::types::EntityId;
use crate::core::units::{meters_to_pixels, pixels_to_meters, vec_to_meters, vec_to_pixels};

// ---------------------------------------------------------------------------
// Conversion helpers (private) — glam pixels ↔ nalgebra meters
// ---------------------------------------------------------------------------

fn px_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    let m = vec_to_meters(v);
    nalgebra::Vector2::new(m.x, m.y)
}

fn na_to_px(v: &nalgebra::Vector2<f32>) -> Vec2 {
    vec_to_pixels(Vec2::new(v.x, v.y))
}

fn na_iso_to_px_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = vec_to_pixels(Vec2::new(iso.translation.x, iso.translation.y));
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Level geometry, pivots, sensor zones. Never moves.
    Static,
    /// Position-driven body (the goalkeeper). Pushes dynamics, ignores forces.
    Kinematic,
    /// Fully simulated body.
    Dynamic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Kinematic => RigidBodyType::KinematicPositionBased,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }
}

/// Shape description for a collider. All lengths are pixels.
#[derive(Debug, Clone)]
pub enum ShapeDesc {
    Circle { radius: f32 },
    Rectangle { width: f32, height: f32 },
    /// Closed polygon chain; vertices in pixel space, relative to the body
    /// position. Used for the static table outline.
    Chain { vertices: Vec<Vec2> },
    /// Solid convex hull of an outline; vertices in pixel space. Chains
    /// have no area, so irregular dynamic props use this to get mass.
    Polygon { vertices: Vec<Vec2> },
}

impl ShapeDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match self {
            ShapeDesc::Circle { radius } => ColliderBuilder::ball(pixels_to_meters(*radius)),
            ShapeDesc::Rectangle { width, height } => ColliderBuilder::cuboid(
                pixels_to_meters(width / 2.0),
                pixels_to_meters(height / 2.0),
            ),
            ShapeDesc::Chain { vertices } => {
                let points: Vec<nalgebra::Point2<f32>> = vertices
                    .iter()
                    .map(|v| {
                        let m = vec_to_meters(*v);
                        nalgebra::Point2::new(m.x, m.y)
                    })
                    .collect();
                // Close the loop back to the first vertex.
                let n = points.len() as u32;
                let indices: Vec<[u32; 2]> = (0..n).map(|i| [i, (i + 1) % n]).collect();
                ColliderBuilder::polyline(points, Some(indices))
            }
            ShapeDesc::Polygon { vertices } => {
                let points: Vec<nalgebra::Point2<f32>> = vertices
                    .iter()
                    .map(|v| {
                        let m = vec_to_meters(*v);
                        nalgebra::Point2::new(m.x, m.y)
                    })
                    .collect();
                match ColliderBuilder::convex_hull(&points) {
                    Some(builder) => builder,
                    None => {
                        log::warn!("degenerate polygon outline, substituting a point collider");
                        ColliderBuilder::ball(pixels_to_meters(1.0))
                    }
                }
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
/// Positions in pixels, velocities in pixels per second.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub gravity_scale: f32,
    pub fixed_rotation: bool,
    /// Continuous collision detection (bullet semantics) for fast movers.
    pub ccd: bool,
    /// Sensors overlap without colliding and only report contacts.
    pub sensor: bool,
    pub shape: ShapeDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    pub fn new(kind: BodyKind, shape: ShapeDesc) -> Self {
        Self {
            kind,
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            gravity_scale: if kind == BodyKind::Dynamic { 1.0 } else { 0.0 },
            fixed_rotation: false,
            ccd: false,
            sensor: false,
            shape,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn dynamic(shape: ShapeDesc) -> Self {
        Self::new(BodyKind::Dynamic, shape)
    }

    pub fn fixed(shape: ShapeDesc) -> Self {
        Self::new(BodyKind::Static, shape)
    }

    pub fn kinematic(shape: ShapeDesc) -> Self {
        Self::new(BodyKind::Kinematic, shape)
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}

/// Handle pair referencing Rapier internals.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Handle to a motorized joint in the simulation.
#[derive(Debug, Clone, Copy)]
pub struct JointHandle(pub(crate) ImpulseJointHandle);

/// A contact-begin event between two bodies, reported once per new contact.
/// Owner ids come from the body `user_data` registry, so the router can map
/// handles back to game objects without back-pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactEvent {
    pub a: EntityId,
    pub b: EntityId,
    /// True when at least one side of the pair is a sensor zone.
    pub sensor: bool,
}

/// Result of a successful ray test. Distance in pixels.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub owner: EntityId,
    pub distance: f32,
    pub normal: Vec2,
}

// ---------------------------------------------------------------------------
// Event collector
// ---------------------------------------------------------------------------

struct ContactCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl ContactCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<CollisionEvent> {
        std::mem::take(&mut *self.collisions.lock().unwrap())
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions.lock().unwrap().push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        // Contact forces are unused; the trait requires the method.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single pixel-space adapter.
///
/// Contact events are collected during `step_into` and handed to the caller
/// *after* the pipeline has finished, so game code never mutates body state
/// while the solver is mid-step.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: ContactCollector,
}

impl PhysicsWorld {
    /// Create a physics world. Gravity is in pixels per second squared,
    /// Y-down (e.g. `Vec2::new(0.0, 500.0)` for roughly Earth gravity at
    /// the 50 px/m scale).
    pub fn new(gravity_px: Vec2) -> Self {
        Self {
            gravity: px_to_na(gravity_px),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: ContactCollector::new(),
        }
    }

    /// Set the fixed integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The owning EntityId is stored in the body's `user_data` so contact
    /// events can be routed without pointer back-references.
    pub fn create_body(
        &mut self,
        owner: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.kind.to_rapier())
            .translation(px_to_na(desc.position))
            .rotation(desc.rotation)
            .linvel(px_to_na(desc.velocity))
            .gravity_scale(desc.gravity_scale)
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(owner.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .shape
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .sensor(desc.sensor)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    // -- Named constructors matching the playfield vocabulary --

    /// Dynamic circle at pixel position (x, y).
    pub fn create_circle(
        &mut self,
        owner: EntityId,
        x: f32,
        y: f32,
        radius: f32,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let desc = BodyDesc::dynamic(ShapeDesc::Circle { radius })
            .with_position(Vec2::new(x, y));
        self.create_body(owner, &desc, material)
    }

    /// Dynamic box of full width/height at pixel position (x, y).
    pub fn create_rectangle(
        &mut self,
        owner: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let desc = BodyDesc::dynamic(ShapeDesc::Rectangle { width, height })
            .with_position(Vec2::new(x, y));
        self.create_body(owner, &desc, material)
    }

    /// Static box, used for paddle pivots and table furniture.
    pub fn create_static_rectangle(
        &mut self,
        owner: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> PhysicsBody {
        let desc = BodyDesc::fixed(ShapeDesc::Rectangle { width, height })
            .with_position(Vec2::new(x, y));
        self.create_body(owner, &desc, ColliderMaterial::default())
    }

    /// Static closed polygon chain for level geometry. Vertices in pixels,
    /// relative to (x, y).
    pub fn create_chain(
        &mut self,
        owner: EntityId,
        x: f32,
        y: f32,
        vertices: &[Vec2],
    ) -> PhysicsBody {
        let desc = BodyDesc::fixed(ShapeDesc::Chain {
            vertices: vertices.to_vec(),
        })
        .with_position(Vec2::new(x, y));
        self.create_body(
            owner,
            &desc,
            ColliderMaterial {
                restitution: 0.0,
                ..ColliderMaterial::default()
            },
        )
    }

    /// Non-colliding rectangular zone that only reports contacts.
    pub fn create_rectangle_sensor(
        &mut self,
        owner: EntityId,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> PhysicsBody {
        let desc = BodyDesc::fixed(ShapeDesc::Rectangle { width, height })
            .with_position(Vec2::new(x, y))
            .with_sensor(true);
        self.create_body(owner, &desc, ColliderMaterial::default())
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation by the fixed dt and collect contact-begin events.
    /// Events are appended only after the pipeline returns.
    pub fn step_into(&mut self, contact_events: &mut Vec<ContactEvent>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain() {
            // Only contact starts matter to the router; stops are dropped.
            let (h1, h2, flags) = match event {
                CollisionEvent::Started(h1, h2, flags) => (h1, h2, flags),
                CollisionEvent::Stopped(..) => continue,
            };

            let owner_a = self.collider_owner(h1);
            let owner_b = self.collider_owner(h2);

            if let (Some(a), Some(b)) = (owner_a, owner_b) {
                contact_events.push(ContactEvent {
                    a,
                    b,
                    sensor: flags.contains(CollisionEventFlags::SENSOR),
                });
            }
        }
    }

    /// Set the linear velocity of a body, in pixels per second.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(px_to_na(vel), true);
        }
    }

    /// Current linear velocity of a body, in pixels per second.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_px(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a dynamic body, also zeroing its angular velocity.
    /// Must only be called outside of `step_into` (the deferred-reset rule).
    pub fn set_transform(&mut self, body: &PhysicsBody, pos: Vec2, rotation: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_position(nalgebra::Isometry2::new(px_to_na(pos), rotation), true);
            rb.set_angvel(0.0, true);
        }
    }

    /// Target position for a kinematic body; takes effect on the next step.
    pub fn set_kinematic_position(&mut self, body: &PhysicsBody, pos: Vec2, rotation: f32) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_next_kinematic_position(nalgebra::Isometry2::new(px_to_na(pos), rotation));
        }
    }

    /// Current pixel position and rotation (radians) of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_px_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // -- Joints --

    /// Revolute joint with an always-on motor and hard angular limits,
    /// anchoring `actuated` to `pivot` at the pivot's center. `limits` are
    /// radians `[lower, upper]`; `max_torque` caps the motor impulse.
    pub fn create_revolute_joint(
        &mut self,
        pivot: &PhysicsBody,
        actuated: &PhysicsBody,
        limits: [f32; 2],
        max_torque: f32,
    ) -> JointHandle {
        let joint = RevoluteJointBuilder::new()
            .local_anchor1(nalgebra::Point2::new(0.0, 0.0))
            .local_anchor2(nalgebra::Point2::new(0.0, 0.0))
            .limits(limits)
            .motor_velocity(0.0, 1.0)
            .motor_max_force(max_torque)
            // The pivot collider sits inside the actuated body; a live
            // contact between the pair would pin the motor at rest.
            .contacts_enabled(false)
            .build();
        let handle = self
            .impulse_joints
            .insert(pivot.body_handle, actuated.body_handle, joint, true);
        JointHandle(handle)
    }

    /// Set the target angular velocity of a joint motor (radians/second).
    /// Missing handles are ignored for the frame.
    pub fn set_motor_speed(&mut self, joint: JointHandle, speed: f32) {
        if let Some(j) = self.impulse_joints.get_mut(joint.0) {
            j.data.set_motor_velocity(JointAxis::AngX, speed, 1.0);
        }
    }

    /// Remove a joint from the simulation.
    pub fn remove_joint(&mut self, handle: JointHandle) {
        self.impulse_joints.remove(handle.0, true);
    }

    /// Number of joints in the simulation.
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    // -- Queries --

    /// Cast a ray between two pixel positions against solid colliders.
    /// Sensors never report hits. Returns `None` when nothing intersects.
    pub fn cast_ray(&mut self, from: Vec2, to: Vec2) -> Option<RayHit> {
        let delta = to - from;
        let length_px = delta.length();
        if length_px <= f32::EPSILON {
            return None;
        }
        let dir = delta / length_px;

        self.query_pipeline.update(&self.colliders);

        let origin_m = vec_to_meters(from);
        let ray = Ray::new(
            nalgebra::Point2::new(origin_m.x, origin_m.y),
            nalgebra::Vector2::new(dir.x, dir.y),
        );
        let max_toi = pixels_to_meters(length_px);
        let filter = QueryFilter::default().exclude_sensors();

        let (handle, hit) = self.query_pipeline.cast_ray_and_get_normal(
            &self.bodies,
            &self.colliders,
            &ray,
            max_toi,
            true,
            filter,
        )?;

        let owner = self.collider_owner(handle)?;
        Some(RayHit {
            owner,
            distance: meters_to_pixels(hit.time_of_impact),
            normal: Vec2::new(hit.normal.x, hit.normal.y),
        })
    }

    // -- private helpers --

    fn collider_owner(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(EntityId(body.user_data as u32))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        let mut w = PhysicsWorld::new(Vec2::ZERO);
        w.set_dt(DT);
        w
    }

    #[test]
    fn create_and_remove_body() {
        let mut world = world();
        let body = world.create_circle(EntityId(1), 0.0, 0.0, 10.0, ColliderMaterial::default());
        assert_eq!(world.body_count(), 1);
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn gravity_pulls_in_pixel_units() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 500.0));
        world.set_dt(DT);
        let body = world.create_circle(EntityId(1), 100.0, 100.0, 5.0, ColliderMaterial::default());

        let mut events = Vec::new();
        for _ in 0..30 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&body);
        assert!(pos.y > 100.0, "body should fall: y={}", pos.y);
    }

    #[test]
    fn positions_round_trip_through_the_scale() {
        let mut world = world();
        let body =
            world.create_circle(EntityId(1), 274.0, 121.0, 15.0, ColliderMaterial::default());
        let (pos, _) = world.body_position(&body);
        assert!((pos.x - 274.0).abs() < 1e-3);
        assert!((pos.y - 121.0).abs() < 1e-3);
    }

    #[test]
    fn velocity_set_and_get_in_pixels() {
        let mut world = world();
        let body = world.create_circle(EntityId(1), 0.0, 0.0, 5.0, ColliderMaterial::default());
        world.set_velocity(&body, Vec2::new(150.0, -30.0));
        let vel = world.velocity(&body);
        assert!((vel.x - 150.0).abs() < 1e-2);
        assert!((vel.y + 30.0).abs() < 1e-2);
    }

    #[test]
    fn static_chain_contains_a_falling_ball() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 500.0));
        world.set_dt(DT);

        // A 200x200 px closed box around the origin.
        let outline = [
            Vec2::new(-100.0, -100.0),
            Vec2::new(100.0, -100.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(-100.0, 100.0),
        ];
        world.create_chain(EntityId(1), 0.0, 0.0, &outline);
        let ball = world.create_circle(EntityId(2), 0.0, 0.0, 10.0, ColliderMaterial::default());

        let mut events = Vec::new();
        for _ in 0..240 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&ball);
        assert!(
            pos.y < 100.0 + 1.0,
            "ball should rest on the chain floor, not tunnel: y={}",
            pos.y
        );
    }

    #[test]
    fn polygon_body_has_mass_and_falls() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 500.0));
        world.set_dt(DT);
        let outline = vec![
            Vec2::new(-44.0, -38.0),
            Vec2::new(-18.0, -74.0),
            Vec2::new(30.0, -70.0),
            Vec2::new(59.0, -7.0),
            Vec2::new(25.0, 73.0),
            Vec2::new(-58.0, 1.0),
        ];
        let body = world.create_body(
            EntityId(1),
            &BodyDesc::dynamic(ShapeDesc::Polygon { vertices: outline })
                .with_position(Vec2::new(100.0, 100.0)),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for _ in 0..30 {
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&body);
        assert!(pos.y > 100.0, "solid hull should fall under gravity: y={}", pos.y);
    }

    #[test]
    fn sensor_reports_contact_without_deflecting() {
        let mut world = world();
        world.create_rectangle_sensor(EntityId(7), 200.0, 0.0, 40.0, 200.0);
        let ball = world.create_circle(EntityId(2), 0.0, 0.0, 10.0, ColliderMaterial::default());
        world.set_velocity(&ball, Vec2::new(300.0, 0.0));

        let mut events = Vec::new();
        for _ in 0..120 {
            world.step_into(&mut events);
        }

        let sensor_hits: Vec<_> = events.iter().filter(|e| e.sensor).collect();
        assert!(!sensor_hits.is_empty(), "sensor should report the pass-through");
        let hit = sensor_hits[0];
        let ids = [hit.a, hit.b];
        assert!(ids.contains(&EntityId(7)));
        assert!(ids.contains(&EntityId(2)));

        // The ball kept going; the sensor never pushed back.
        let (pos, _) = world.body_position(&ball);
        assert!(pos.x > 220.0, "ball should cross the zone: x={}", pos.x);
    }

    #[test]
    fn contact_stops_are_dropped() {
        let mut world = world();
        world.create_rectangle_sensor(EntityId(7), 100.0, 0.0, 20.0, 100.0);
        let ball = world.create_circle(EntityId(2), 0.0, 0.0, 10.0, ColliderMaterial::default());
        world.set_velocity(&ball, Vec2::new(400.0, 0.0));

        let mut events = Vec::new();
        for _ in 0..180 {
            world.step_into(&mut events);
        }
        // Exactly one begin event for one pass through the zone.
        let hits = events.iter().filter(|e| e.sensor).count();
        assert_eq!(hits, 1, "one pass must produce one begin event");
    }

    #[test]
    fn revolute_motor_swings_toward_limit() {
        let mut world = world();
        let pivot = world.create_static_rectangle(EntityId(1), 200.0, 200.0, 5.0, 5.0);
        let paddle = world.create_rectangle(
            EntityId(2),
            200.0,
            200.0,
            80.0,
            16.0,
            ColliderMaterial::default(),
        );
        let limits = [-0.25 * std::f32::consts::PI, 0.20 * std::f32::consts::PI];
        let joint = world.create_revolute_joint(&pivot, &paddle, limits, 1000.0);

        world.set_motor_speed(joint, -20.0);
        let mut events = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut events);
        }
        // The overlapping pivot collider must not pin the blade: at
        // -20 rad/s the blade reaches the stop well within 60 frames.
        let (_, rot) = world.body_position(&paddle);
        assert!(
            rot < limits[0] + 0.1,
            "paddle should reach its lower stop: rot={}",
            rot
        );
        assert!(
            rot >= limits[0] - 0.05,
            "paddle must respect the lower limit: rot={}",
            rot
        );
    }

    #[test]
    fn kinematic_body_follows_target_positions() {
        let mut world = world();
        let keeper = world.create_body(
            EntityId(3),
            &BodyDesc::kinematic(ShapeDesc::Rectangle {
                width: 40.0,
                height: 10.0,
            })
            .with_position(Vec2::new(300.0, 60.0)),
            ColliderMaterial::default(),
        );

        let mut events = Vec::new();
        for i in 1..=10 {
            world.set_kinematic_position(&keeper, Vec2::new(300.0 + i as f32 * 2.0, 60.0), 0.0);
            world.step_into(&mut events);
        }
        let (pos, _) = world.body_position(&keeper);
        assert!(
            (pos.x - 320.0).abs() < 1e-2,
            "keeper should track targets: x={}",
            pos.x
        );
    }

    #[test]
    fn ray_hits_a_box_and_reports_owner() {
        let mut world = world();
        world.create_rectangle(EntityId(9), 300.0, 0.0, 100.0, 50.0, ColliderMaterial::default());

        let hit = world
            .cast_ray(Vec2::new(0.0, 0.0), Vec2::new(400.0, 0.0))
            .expect("ray should hit the box");
        assert_eq!(hit.owner, EntityId(9));
        // Box left face is at x = 250.
        assert!((hit.distance - 250.0).abs() < 2.0, "distance={}", hit.distance);
        assert!(hit.normal.x < 0.0, "normal should face the ray origin");
    }

    #[test]
    fn ray_misses_return_none() {
        let mut world = world();
        world.create_rectangle(EntityId(9), 300.0, 300.0, 100.0, 50.0, ColliderMaterial::default());
        assert!(world.cast_ray(Vec2::ZERO, Vec2::new(100.0, 0.0)).is_none());
    }

    #[test]
    fn ray_ignores_sensors() {
        let mut world = world();
        world.create_rectangle_sensor(EntityId(4), 200.0, 0.0, 50.0, 50.0);
        assert!(world.cast_ray(Vec2::ZERO, Vec2::new(400.0, 0.0)).is_none());
    }

    #[test]
    fn set_transform_teleports_and_zeroes_spin() {
        let mut world = world();
        let ball = world.create_circle(EntityId(2), 100.0, 100.0, 10.0, ColliderMaterial::default());
        world.set_transform(&ball, Vec2::new(450.0, 80.0), 0.0);
        world.set_velocity(&ball, Vec2::ZERO);

        let (pos, _) = world.body_position(&ball);
        assert!((pos.x - 450.0).abs() < 1e-3);
        assert!((pos.y - 80.0).abs() < 1e-3);
        assert_eq!(world.velocity(&ball), Vec2::ZERO);
    }

    #[test]
    fn create_and_remove_joint() {
        let mut world = world();
        let a = world.create_static_rectangle(EntityId(1), 0.0, 0.0, 5.0, 5.0);
        let b = world.create_rectangle(EntityId(2), 0.0, 0.0, 40.0, 10.0, ColliderMaterial::default());
        assert_eq!(world.joint_count(), 0);
        let handle = world.create_revolute_joint(&a, &b, [-1.0, 1.0], 500.0);
        assert_eq!(world.joint_count(), 1);
        world.remove_joint(handle);
        assert_eq!(world.joint_count(), 0);
    }
}
