//! Nav agents: the movement side of a bot
//!
//! The controller owns one clone of the agent and writes destinations into
//! it; the simulation keeps another clone and moves the bot's entity toward
//! whatever destination is pending. Path computation is out of scope, so the
//! agent seeks in a straight line.

use glam::Vec3;
use parking_lot::Mutex;
use std::sync::Arc;
use steer_ai::Movement;

#[derive(Debug, Default)]
struct NavSlot {
    destination: Option<Vec3>,
    requests: u64,
}

/// Shared destination slot
#[derive(Debug, Clone, Default)]
pub struct NavAgent {
    slot: Arc<Mutex<NavSlot>>,
}

impl NavAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending destination, if the bot has not arrived yet
    pub fn destination(&self) -> Option<Vec3> {
        self.slot.lock().destination
    }

    /// Destinations requested so far
    pub fn requests(&self) -> u64 {
        self.slot.lock().requests
    }

    /// Move `from` toward the pending destination by at most `speed * dt`.
    /// Clears the destination on arrival.
    pub fn step(&self, from: Vec3, speed: f32, dt: f32) -> Vec3 {
        let mut slot = self.slot.lock();
        let Some(destination) = slot.destination else {
            return from;
        };

        let offset = destination - from;
        let max_step = speed * dt;
        if offset.length_squared() <= max_step * max_step {
            slot.destination = None;
            destination
        } else {
            from + offset.normalize() * max_step
        }
    }
}

impl Movement for NavAgent {
    fn set_destination(&mut self, destination: Vec3) {
        let mut slot = self.slot.lock();
        slot.destination = Some(destination);
        slot.requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_toward_destination() {
        let mut agent = NavAgent::new();
        agent.set_destination(Vec3::new(10.0, 0.0, 0.0));

        let next = agent.step(Vec3::ZERO, 2.0, 0.5);
        assert_relative_eq!(next.x, 1.0);
        assert_eq!(agent.destination(), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn test_arrival_clears_destination() {
        let mut agent = NavAgent::new();
        agent.set_destination(Vec3::new(0.5, 0.0, 0.0));

        let next = agent.step(Vec3::ZERO, 2.0, 0.5);
        assert_eq!(next, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(agent.destination(), None);
        assert_eq!(agent.step(next, 2.0, 0.5), next);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let observer = NavAgent::new();
        let mut controller_side = observer.clone();
        controller_side.set_destination(Vec3::ONE);
        controller_side.set_destination(Vec3::X);

        assert_eq!(observer.destination(), Some(Vec3::X));
        assert_eq!(observer.requests(), 2);
    }
}
