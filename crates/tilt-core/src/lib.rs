pub mod api;
pub mod assets;
pub mod audio;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{EngineContext, Game, GameConfig};
pub use api::types::{EntityId, GameEvent, SfxId};
pub use assets::manifest::AssetManifest;
pub use assets::registry::SpriteRegistry;
pub use audio::bank::{SoundBank, SoundCommand, MAX_SOUNDS};
pub use components::entity::Entity;
pub use components::sprite::{AtlasId, SpriteComponent};
pub use core::physics::{
    BodyDesc, BodyKind, ColliderMaterial, ContactEvent, JointHandle, PhysicsBody, PhysicsWorld,
    RayHit, ShapeDesc,
};
pub use core::rng::Rng;
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::units::{meters_to_pixels, pixels_to_meters, PIXELS_PER_METER};
pub use input::queue::{InputEvent, InputQueue, InputState};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::render::build_render_buffer;
