//! Minimal host world: tagged entities with positions

use glam::Vec3;
use std::collections::HashMap;
use steer_ai::Perception;
use steer_core::{EntityId, IdGenerator, Tag};

/// An entity as the host sees it
#[derive(Debug, Clone)]
struct SimEntity {
    id: EntityId,
    position: Vec3,
    tags: Vec<Tag>,
    /// Disabled entities are invisible to queries and lookups
    active: bool,
}

/// Entity storage with a linear-scan sphere overlap query
#[derive(Default)]
pub struct SimWorld {
    ids: IdGenerator,
    entities: HashMap<EntityId, SimEntity>,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Vec3, tags: impl IntoIterator<Item = Tag>) -> EntityId {
        let id = self.ids.next();
        self.entities.insert(
            id,
            SimEntity {
                id,
                position,
                tags: tags.into_iter().collect(),
                active: true,
            },
        );
        id
    }

    /// Remove an entity; returns `false` if it did not exist
    pub fn despawn(&mut self, id: EntityId) -> bool {
        self.entities.remove(&id).is_some()
    }

    pub fn set_active(&mut self, id: EntityId, active: bool) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.active = active;
                true
            }
            None => false,
        }
    }

    /// Position regardless of the active flag
    pub fn position(&self, id: EntityId) -> Option<Vec3> {
        self.entities.get(&id).map(|e| e.position)
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.position = position;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Perception for SimWorld {
    fn query_entities_near(&self, position: Vec3, radius: f32) -> Vec<EntityId> {
        let radius_sq = radius * radius;
        self.entities
            .values()
            .filter(|e| e.active && (e.position - position).length_squared() <= radius_sq)
            .map(|e| e.id)
            .collect()
    }

    fn has_tag(&self, entity: EntityId, tag: &Tag) -> bool {
        self.entities
            .get(&entity)
            .map(|e| e.tags.contains(tag))
            .unwrap_or(false)
    }

    fn position_of(&self, entity: EntityId) -> Option<Vec3> {
        self.entities
            .get(&entity)
            .filter(|e| e.active)
            .map(|e| e.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_query() {
        let mut world = SimWorld::new();
        let near = world.spawn(Vec3::new(1.0, 0.0, 0.0), [Tag::player()]);
        let edge = world.spawn(Vec3::new(0.0, 0.0, 3.0), []);
        let far = world.spawn(Vec3::new(10.0, 0.0, 0.0), []);

        let mut found = world.query_entities_near(Vec3::ZERO, 3.0);
        found.sort();
        assert_eq!(found, vec![near, edge]);
        assert!(!found.contains(&far));
    }

    #[test]
    fn test_inactive_entities_disappear() {
        let mut world = SimWorld::new();
        let id = world.spawn(Vec3::ZERO, [Tag::player()]);

        assert!(world.set_active(id, false));
        assert!(world.position_of(id).is_none());
        assert!(world.query_entities_near(Vec3::ZERO, 1.0).is_empty());
        assert_eq!(world.position(id), Some(Vec3::ZERO));

        assert!(world.set_active(id, true));
        assert_eq!(world.position_of(id), Some(Vec3::ZERO));
    }

    #[test]
    fn test_despawn() {
        let mut world = SimWorld::new();
        let id = world.spawn(Vec3::ZERO, [Tag::player()]);
        assert!(world.has_tag(id, &Tag::player()));
        assert!(world.despawn(id));
        assert!(!world.despawn(id));
        assert!(!world.has_tag(id, &Tag::player()));
        assert!(world.is_empty());
    }
}
