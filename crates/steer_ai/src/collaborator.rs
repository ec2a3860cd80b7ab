//! Engine-facing collaborator interfaces
//!
//! The AI decides *what* a bot should do; the host engine does it. These traits
//! are the only way the core reaches the outside world:
//!
//! - [`Movement`]: path requests (fire-and-forget)
//! - [`Perception`]: spatial overlap queries and entity lookups
//! - [`Renderer`]: visual state markers

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use steer_core::{EntityId, Tag};

/// Opaque visual indicator applied when a state becomes current
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({:?})", self.0)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Movement agent attached to the bot
pub trait Movement {
    /// Request a path to `destination`. No completion is reported back.
    fn set_destination(&mut self, destination: Vec3);
}

/// Read-only view of the host world
pub trait Perception {
    /// Entities whose volume overlaps the sphere at `position` with `radius`.
    /// Order is up to the host.
    fn query_entities_near(&self, position: Vec3, radius: f32) -> Vec<EntityId>;

    /// Whether `entity` carries `tag`
    fn has_tag(&self, entity: EntityId, tag: &Tag) -> bool;

    /// Current position of `entity`, or `None` once it is destroyed or disabled
    fn position_of(&self, entity: EntityId) -> Option<Vec3>;
}

/// Visual state indicator on the bot
pub trait Renderer {
    fn apply_marker(&mut self, entity: EntityId, marker: &Marker);
}

impl<M: Movement + ?Sized> Movement for Box<M> {
    fn set_destination(&mut self, destination: Vec3) {
        (**self).set_destination(destination)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn apply_marker(&mut self, entity: EntityId, marker: &Marker) {
        (**self).apply_marker(entity, marker)
    }
}
