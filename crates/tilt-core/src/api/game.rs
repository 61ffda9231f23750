use glam::Vec2;
use std::collections::HashMap;

use crate::api::types::{EntityId, GameEvent, SfxId};
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::SpriteRegistry;
use crate::audio::bank::{SoundBank, SoundCommand};
use crate::components::entity::Entity;
use crate::core::physics::{BodyDesc, ColliderMaterial, ContactEvent, PhysicsWorld};
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::input::queue::InputState;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Playfield width in pixels.
    pub world_width: f32,
    /// Playfield height in pixels.
    pub world_height: f32,
    /// Gravity in pixels per second squared, Y-down.
    pub gravity: Vec2,
    /// Hard cap on scene entities; oldest are evicted past this.
    pub max_entities: usize,
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            gravity: Vec2::new(0.0, 500.0),
            max_entities: 256,
            rng_seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: build the level, spawn bodies, load assets.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed-step tick with the frame's sampled input.
    /// Returns false when the game wants the shell to quit.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) -> bool;
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub physics: PhysicsWorld,
    pub audio: SoundBank,
    pub sprites: SpriteRegistry,
    pub events: Vec<GameEvent>,
    pub rng: Rng,
    sfx_by_name: HashMap<String, SfxId>,
    contact_events: Vec<ContactEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        physics.set_dt(config.fixed_dt);
        Self {
            scene: Scene::with_capacity(config.max_entities),
            physics,
            audio: SoundBank::new(),
            sprites: SpriteRegistry::new(),
            events: Vec::new(),
            rng: Rng::new(config.rng_seed),
            sfx_by_name: HashMap::new(),
            contact_events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Install assets from a JSON manifest: sprites become the registry,
    /// sounds are registered into the bank in name order (deterministic
    /// slot assignment). Parse failures propagate; the caller decides
    /// whether to continue without assets.
    pub fn load_assets(&mut self, manifest_json: &str) -> Result<(), serde_json::Error> {
        let manifest = AssetManifest::from_json(manifest_json)?;
        self.sprites = SpriteRegistry::from_manifest(&manifest);

        let mut names: Vec<&String> = manifest.sounds.keys().collect();
        names.sort();
        for name in names {
            if let Some(id) = self.audio.register(&manifest.sounds[name].path) {
                self.sfx_by_name.insert(name.clone(), id);
            }
        }
        Ok(())
    }

    /// Look up a registered sound effect by manifest name.
    pub fn sfx(&self, name: &str) -> Option<SfxId> {
        self.sfx_by_name.get(name).copied()
    }

    /// Emit a game event for the shell (HUD updates etc.).
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data (events, contacts).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.contact_events.clear();
    }

    /// Drain the frame's audio commands (called by the shell).
    pub fn drain_sound_commands(&mut self) -> Vec<SoundCommand> {
        self.audio.drain_commands()
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. If the scene cap evicts an older
    /// entity, its body is removed from the simulation as well.
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_body(body);
        if let Some(evicted) = self.scene.spawn(entity) {
            if let Some(body) = &evicted.body {
                self.physics.remove_body(body);
            }
        }
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Set the linear velocity of an entity's physics body (px/s).
    pub fn set_velocity(&mut self, id: EntityId, vel: Vec2) {
        if let Some(entity) = self.scene.get(id) {
            if let Some(body) = &entity.body {
                self.physics.set_velocity(body, vel);
            }
        }
    }

    /// Linear velocity of an entity's physics body (px/s).
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Contact-begin events from the most recent physics step.
    pub fn contacts(&self) -> &[ContactEvent] {
        &self.contact_events
    }

    /// Step the physics simulation and sync body transforms back to the
    /// scene. Contact events become available through `contacts()` only
    /// after this returns — game code never observes mid-step state.
    pub fn step_physics(&mut self) {
        self.contact_events.clear();
        self.physics.step_into(&mut self.contact_events);

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::ShapeDesc;

    fn ctx() -> EngineContext {
        EngineContext::new(&GameConfig::default())
    }

    #[test]
    fn spawn_with_body_creates_entity_and_physics() {
        let mut ctx = ctx();
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 200.0));
        let desc = BodyDesc::dynamic(ShapeDesc::Circle { radius: 10.0 })
            .with_position(Vec2::new(100.0, 200.0));

        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        assert_eq!(ctx.scene.len(), 1);
        assert_eq!(ctx.physics.body_count(), 1);
        assert!(ctx.scene.get(id).unwrap().body.is_some());
    }

    #[test]
    fn despawn_cleans_up_physics() {
        let mut ctx = ctx();
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ShapeDesc::Circle { radius: 10.0 });
        ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        assert_eq!(ctx.physics.body_count(), 1);

        ctx.despawn(id);
        assert_eq!(ctx.scene.len(), 0);
        assert_eq!(ctx.physics.body_count(), 0);
    }

    #[test]
    fn eviction_also_removes_the_physics_body() {
        let config = GameConfig {
            max_entities: 2,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::new(&config);
        for _ in 0..3 {
            let id = ctx.next_id();
            let desc = BodyDesc::dynamic(ShapeDesc::Circle { radius: 5.0 });
            ctx.spawn_with_body(Entity::new(id), desc, ColliderMaterial::default());
        }
        assert_eq!(ctx.scene.len(), 2);
        assert_eq!(ctx.physics.body_count(), 2);
        assert!(ctx.scene.get(EntityId(1)).is_none());
    }

    #[test]
    fn step_physics_syncs_positions() {
        let mut ctx = ctx();
        let id = ctx.next_id();
        let entity = Entity::new(id).with_pos(Vec2::new(100.0, 0.0));
        let desc = BodyDesc::dynamic(ShapeDesc::Circle { radius: 5.0 })
            .with_position(Vec2::new(100.0, 0.0));
        ctx.spawn_with_body(entity, desc, ColliderMaterial::default());

        for _ in 0..10 {
            ctx.step_physics();
        }

        let entity = ctx.scene.get(id).unwrap();
        assert!(
            entity.pos.y > 0.0,
            "entity should have fallen under gravity: y={}",
            entity.pos.y
        );
    }

    #[test]
    fn load_assets_installs_sprites_and_sounds() {
        let mut ctx = ctx();
        let json = r#"{
            "atlases": [
                { "name": "table", "cols": 8, "rows": 4, "path": "table.png" }
            ],
            "sprites": {
                "ball": { "atlas": 0, "col": 1, "row": 0 }
            },
            "sounds": {
                "bonus": { "path": "bonus.wav" },
                "goal": { "path": "goal.wav" }
            }
        }"#;
        ctx.load_assets(json).unwrap();

        assert!(ctx.sprites.get("ball").is_some());
        let bonus = ctx.sfx("bonus").expect("bonus registered");
        let goal = ctx.sfx("goal").expect("goal registered");
        assert_ne!(bonus, goal);
        // Name-order registration is deterministic.
        assert_eq!(bonus, SfxId(0));
        assert_eq!(goal, SfxId(1));
    }

    #[test]
    fn bad_manifest_propagates_the_parse_error() {
        let mut ctx = ctx();
        assert!(ctx.load_assets("definitely not json").is_err());
    }
}
