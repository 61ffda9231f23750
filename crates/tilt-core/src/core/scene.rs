use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Default entity capacity when none is given.
const DEFAULT_CAPACITY: usize = 256;

/// Simple entity storage using a flat Vec, bounded by a hard capacity.
///
/// When the cap is reached, spawning evicts the oldest entity and hands it
/// back to the caller so any attached physics body can be cleaned up. This
/// keeps player-spawned props from growing without bound over a long
/// session.
pub struct Scene {
    entities: Vec<Entity>,
    capacity: usize,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a scene with a specific entity cap.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: capacity.max(1),
        }
    }

    /// Add an entity. If the scene is at capacity, the oldest entity is
    /// evicted and returned.
    pub fn spawn(&mut self, entity: Entity) -> Option<Entity> {
        let evicted = if self.entities.len() >= self.capacity {
            Some(self.entities.remove(0))
        } else {
            None
        };
        self.entities.push(entity);
        evicted
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities
            .iter()
            .position(|e| e.id == id)
            .map(|idx| self.entities.remove(idx))
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
