//! Scripted player that walks a looping route

use crate::world::SimWorld;
use glam::Vec3;
use steer_core::EntityId;

pub struct ScriptedPlayer {
    entity: EntityId,
    waypoints: Vec<Vec3>,
    next: usize,
    speed: f32,
}

impl ScriptedPlayer {
    pub fn new(entity: EntityId, waypoints: Vec<Vec3>, speed: f32) -> Self {
        Self {
            entity,
            waypoints,
            next: 0,
            speed: speed.max(0.0),
        }
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Waypoint currently walked toward
    pub fn heading_to(&self) -> Option<Vec3> {
        self.waypoints.get(self.next).copied()
    }

    /// Advance along the route. Does nothing once the entity is gone.
    pub fn step(&mut self, world: &mut SimWorld, dt: f32) {
        let Some(position) = world.position(self.entity) else {
            return;
        };
        let Some(waypoint) = self.heading_to() else {
            return;
        };

        let offset = waypoint - position;
        let max_step = self.speed * dt;
        let next = if offset.length_squared() <= max_step * max_step {
            self.next = (self.next + 1) % self.waypoints.len();
            waypoint
        } else {
            position + offset.normalize() * max_step
        };
        world.set_position(self.entity, next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steer_core::Tag;

    #[test]
    fn test_route_loops() {
        let mut world = SimWorld::new();
        let id = world.spawn(Vec3::ZERO, [Tag::player()]);
        let mut player = ScriptedPlayer::new(
            id,
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO],
            1.0,
        );

        player.step(&mut world, 1.0);
        assert_eq!(world.position(id), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(player.heading_to(), Some(Vec3::ZERO));

        player.step(&mut world, 1.0);
        assert_eq!(world.position(id), Some(Vec3::ZERO));
        assert_eq!(player.heading_to(), Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_partial_step() {
        let mut world = SimWorld::new();
        let id = world.spawn(Vec3::ZERO, [Tag::player()]);
        let mut player = ScriptedPlayer::new(id, vec![Vec3::new(0.0, 0.0, 4.0)], 1.0);

        player.step(&mut world, 1.0);
        assert_eq!(world.position(id), Some(Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_despawned_player_stands_still() {
        let mut world = SimWorld::new();
        let id = world.spawn(Vec3::ZERO, [Tag::player()]);
        world.despawn(id);
        let mut player = ScriptedPlayer::new(id, vec![Vec3::ONE], 1.0);
        player.step(&mut world, 1.0);
        assert_eq!(world.position(id), None);
    }
}
