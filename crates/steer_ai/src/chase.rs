//! Chase: follow a recorded target, re-issuing its position on a slow cadence

use crate::collaborator::{Marker, Perception};
use crate::config::AiConfig;
use crate::range;
use crate::schedule::{Cadence, TaskId, TaskScheduler};
use crate::state::{Lifecycle, Senses, StateKind, Transition};
use glam::Vec3;
use steer_core::EntityId;

#[derive(Debug)]
pub struct ChaseState {
    marker: Marker,
    target: Option<EntityId>,
    chase_range: f32,
    close_range: f32,
    min_chase_range: f32,
    retarget_cadence: Cadence,
    retarget_task: Option<TaskId>,
    last_destination: Option<Vec3>,
    pub(crate) lifecycle: Lifecycle,
}

impl ChaseState {
    /// Build from the chase section; the configured chase range goes through
    /// the same floor as [`set_chase_range`](Self::set_chase_range)
    pub fn from_config(config: &AiConfig) -> Self {
        let min_chase_range = range::radius(config.chase.min_chase_range);
        Self {
            marker: config.markers.chase.clone(),
            target: None,
            chase_range: range::effective_chase_range(config.chase.chase_range, min_chase_range),
            close_range: range::radius(config.chase.close_range),
            min_chase_range,
            retarget_cadence: Cadence::Fixed(config.chase.retarget_interval),
            retarget_task: None,
            last_destination: None,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Marker applied when the chase starts
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Start/stop bookkeeping
    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// Entity being chased, cleared once the host stops resolving it
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Record (or clear) the entity to chase. Survives stop/start.
    pub fn set_target(&mut self, target: Option<EntityId>) {
        self.target = target;
    }

    /// Effective escape range; the target is lost beyond it
    pub fn chase_range(&self) -> f32 {
        self.chase_range
    }

    /// Proposals below the minimum chase range are raised to it
    pub fn set_chase_range(&mut self, proposed: f32) {
        self.chase_range = range::effective_chase_range(proposed, self.min_chase_range);
    }

    /// Range under which the bot switches to close-follow
    pub fn close_range(&self) -> f32 {
        self.close_range
    }

    /// Negative or NaN ranges become zero
    pub fn set_close_range(&mut self, range: f32) {
        self.close_range = range::radius(range);
    }

    /// Last destination issued by the retarget task
    pub fn last_destination(&self) -> Option<Vec3> {
        self.last_destination
    }

    pub(crate) fn start(&mut self, tasks: &mut TaskScheduler<StateKind>) {
        self.lifecycle.enter();
        self.retarget_task = Some(tasks.spawn(StateKind::Chase, self.retarget_cadence));
    }

    pub(crate) fn stop(&mut self, tasks: &mut TaskScheduler<StateKind>) {
        if let Some(task) = self.retarget_task.take() {
            tasks.cancel(task);
        }
        self.lifecycle.exit();
    }

    pub(crate) fn update(&mut self, senses: &Senses<'_>) -> Option<Transition> {
        let Some(target) = self.target else {
            return Some(Transition::Idle);
        };
        let Some(target_position) = senses.perception.position_of(target) else {
            log::debug!("Bot {} lost chase target {}", senses.entity, target);
            self.target = None;
            return Some(Transition::Idle);
        };

        if range::beyond(senses.position, target_position, self.chase_range) {
            log::debug!("Chase target {} escaped bot {}", target, senses.entity);
            Some(Transition::Idle)
        } else if range::inside(senses.position, target_position, self.close_range) {
            Some(Transition::CloseFollow {
                target,
                range: self.close_range,
            })
        } else {
            None
        }
    }

    /// Retarget task action: where the target is now, if it still exists
    pub(crate) fn retarget(&mut self, perception: &dyn Perception) -> Option<Vec3> {
        let destination = perception.position_of(self.target?)?;
        self.last_destination = Some(destination);
        Some(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chase_range_setter() {
        let mut config = AiConfig::default();
        config.chase.min_chase_range = 1.0;
        let mut chase = ChaseState::from_config(&config.with_buffer(1.0));

        chase.set_chase_range(0.3);
        assert_eq!(chase.chase_range(), 1.0);

        chase.set_chase_range(5.0);
        assert_eq!(chase.chase_range(), 5.0);
    }

    #[test]
    fn test_initial_range_goes_through_setter() {
        let mut config = AiConfig::default();
        config.chase.chase_range = 0.1;
        config.chase.min_chase_range = 2.0;
        let chase = ChaseState::from_config(&config);
        assert_eq!(chase.chase_range(), 2.0);
    }

    #[test]
    fn test_target_persists_across_reentry() {
        let mut tasks = TaskScheduler::new();
        let mut chase = ChaseState::from_config(&AiConfig::default());
        let target = EntityId::new(2, 0);
        chase.set_target(Some(target));

        chase.start(&mut tasks);
        chase.stop(&mut tasks);
        chase.start(&mut tasks);

        assert_eq!(chase.target(), Some(target));
        assert_eq!(chase.lifecycle().entries(), 2);
        assert_eq!(tasks.len(), 1);
    }
}
