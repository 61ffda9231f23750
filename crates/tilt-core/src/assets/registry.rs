use std::collections::HashMap;

use crate::assets::manifest::AssetManifest;
use crate::components::sprite::{AtlasId, SpriteComponent};

/// Registry of named sprites, built from an AssetManifest.
/// Missing names degrade: the lookup warns once per call site usage and the
/// caller spawns the entity without a sprite rather than failing.
pub struct SpriteRegistry {
    sprites: HashMap<String, SpriteComponent>,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self {
            sprites: HashMap::new(),
        }
    }

    /// Build a registry from a parsed AssetManifest.
    pub fn from_manifest(manifest: &AssetManifest) -> Self {
        let mut sprites = HashMap::with_capacity(manifest.sprites.len());
        for (name, desc) in &manifest.sprites {
            sprites.insert(
                name.clone(),
                SpriteComponent {
                    atlas: AtlasId(desc.atlas),
                    col: desc.col as f32,
                    row: desc.row as f32,
                    cell_span: desc.span as f32,
                    alpha: 1.0,
                },
            );
        }
        Self { sprites }
    }

    /// Look up a sprite by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&SpriteComponent> {
        self.sprites.get(name)
    }

    /// Look up a sprite by name, logging a warning when it is missing so
    /// the degraded entity is visible in the logs.
    pub fn get_or_warn(&self, name: &str) -> Option<SpriteComponent> {
        match self.sprites.get(name) {
            Some(sprite) => Some(sprite.clone()),
            None => {
                log::warn!("sprite '{}' missing from manifest, entity will not be drawn", name);
                None
            }
        }
    }
}

impl Default for SpriteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
