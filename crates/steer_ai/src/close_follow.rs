//! Close-follow: stay on a target that is within close range

use crate::collaborator::Marker;
use crate::config::AiConfig;
use crate::range;
use crate::state::{Lifecycle, Senses, Transition};
use steer_core::EntityId;

#[derive(Debug)]
pub struct CloseFollowState {
    marker: Marker,
    target: Option<EntityId>,
    close_follow_range: f32,
    buffer: f32,
    ceiling: f32,
    pub(crate) lifecycle: Lifecycle,
}

impl CloseFollowState {
    /// Build from the close-follow section and the shared buffer
    pub fn from_config(config: &AiConfig) -> Self {
        let mut state = Self {
            marker: config.markers.close_combat.clone(),
            target: None,
            close_follow_range: 0.0,
            buffer: config.buffer,
            ceiling: config.close_follow.ceiling,
            lifecycle: Lifecycle::default(),
        };
        state.set_close_follow_range(config.close_follow.close_follow_range);
        state
    }

    /// Marker applied when close-follow starts
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Start/stop bookkeeping
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Entity being followed
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Record (or clear) the entity to follow. Survives stop/start.
    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    /// Effective exit range, buffer included
    pub fn close_follow_range(&self) -> f32 {
        self.close_follow_range
    }

    /// Effective range is `proposed + buffer`, clamped into `[0, ceiling]`
    pub fn set_close_follow_range(&mut self, proposed: f32) {
        self.close_follow_range =
            range::effective_close_follow_range(proposed, self.buffer, self.ceiling);
    }

    pub(crate) fn start(&mut self) {
        self.lifecycle.enter();
    }

    pub(crate) fn stop(&mut self) {
        self.lifecycle.exit();
    }

    pub(crate) fn update(&mut self, senses: &Senses<'_>) -> Option<Transition> {
        let Some(target) = self.target else {
            return Some(Transition::Idle);
        };
        let Some(target_position) = senses.perception.position_of(target) else {
            log::debug!("Bot {} lost close-follow target {}", senses.entity, target);
            self.target = None;
            return Some(Transition::Idle);
        };

        if range::beyond(senses.position, target_position, self.close_follow_range) {
            Some(Transition::Chase {
                target,
                range: None,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_follow_range_setter() {
        let mut state = CloseFollowState::from_config(&AiConfig::default().with_buffer(2.0));

        state.set_close_follow_range(99.0);
        assert_eq!(state.close_follow_range(), 100.0);

        state.set_close_follow_range(-10.0);
        assert_eq!(state.close_follow_range(), 0.0);

        state.set_close_follow_range(3.0);
        assert_eq!(state.close_follow_range(), 5.0);
    }

    #[test]
    fn test_default_range_includes_buffer() {
        let state = CloseFollowState::from_config(&AiConfig::default());
        assert_eq!(state.close_follow_range(), 3.0);
    }
}
