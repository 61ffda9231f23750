use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene. Also stored in physics
/// body `user_data`, which is how contact events get routed back to game
/// objects without pointer back-references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Handle to a previously registered sound effect slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SfxId(pub u32);

/// A game event communicated to the application shell (HUD score/lives
/// updates and the like). Generic container: `kind` identifies the event,
/// `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;
}
