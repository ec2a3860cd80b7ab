//! Range predicates and range setters
//!
//! All distance checks compare squared magnitudes. The comparisons are strict,
//! so a target sitting exactly on a threshold never triggers a transition.

use glam::Vec3;

#[inline]
pub fn distance_squared(a: Vec3, b: Vec3) -> f32 {
    (a - b).length_squared()
}

/// `a` and `b` are farther apart than `range`
#[inline]
pub fn beyond(a: Vec3, b: Vec3, range: f32) -> bool {
    distance_squared(a, b) > range * range
}

/// `a` and `b` are strictly nearer than `range`
#[inline]
pub fn inside(a: Vec3, b: Vec3, range: f32) -> bool {
    distance_squared(a, b) < range * range
}

/// `a` and `b` are no farther apart than `range` (overlap semantics)
#[inline]
pub fn within(a: Vec3, b: Vec3, range: f32) -> bool {
    distance_squared(a, b) <= range * range
}

/// Non-negative radius; NaN collapses to zero.
#[inline]
pub fn radius(value: f32) -> f32 {
    value.max(0.0)
}

/// Effective chase range for a proposed value.
///
/// A proposal under `minimum` is replaced by `minimum`, so the chase state is
/// never handed a range it would abandon on the very next tick.
#[inline]
pub fn effective_chase_range(proposed: f32, minimum: f32) -> f32 {
    if proposed >= minimum {
        proposed
    } else {
        minimum
    }
}

/// Effective close-follow range: `proposed + buffer` clamped into `[0, ceiling]`.
#[inline]
pub fn effective_close_follow_range(proposed: f32, buffer: f32, ceiling: f32) -> f32 {
    (proposed + buffer).max(0.0).min(ceiling.max(0.0))
}
