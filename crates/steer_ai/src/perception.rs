//! Target acquisition on top of the host's overlap query

use crate::collaborator::Perception;
use crate::range;
use glam::Vec3;
use steer_core::{EntityId, Tag};

/// A tagged entity found by [`detect`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub entity: EntityId,
    pub position: Vec3,
    pub distance_squared: f32,
}

/// Find the entity carrying `tag` within `radius` of `position`.
///
/// The host's overlap query decides the candidate set; the seeker itself and
/// entities the host can no longer locate are skipped. When several match, the
/// nearest wins and equal distances go to the lower id, so the result does not
/// depend on the host's iteration order.
pub fn detect(
    perception: &dyn Perception,
    seeker: EntityId,
    position: Vec3,
    radius: f32,
    tag: &Tag,
) -> Option<Detection> {
    let radius = range::radius(radius);

    perception
        .query_entities_near(position, radius)
        .into_iter()
        .filter(|&entity| entity != seeker && perception.has_tag(entity, tag))
        .filter_map(|entity| {
            let found = perception.position_of(entity)?;
            range::within(position, found, radius).then(|| Detection {
                entity,
                position: found,
                distance_squared: range::distance_squared(position, found),
            })
        })
        .min_by(|a, b| {
            a.distance_squared
                .partial_cmp(&b.distance_squared)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.entity.cmp(&b.entity))
        })
}
