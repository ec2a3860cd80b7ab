//! State identities, transitions and the per-bot state set
//!
//! The four behaviors form a closed set, so they are a tag ([`StateKind`]) plus
//! one persistent struct per variant held together in a [`StateSet`]. Start,
//! stop and update are dispatched with an exhaustive `match`; adding a variant
//! fails to compile until every table below handles it.

use crate::chase::ChaseState;
use crate::close_follow::CloseFollowState;
use crate::collaborator::{Marker, Perception};
use crate::config::AiConfig;
use crate::dead::DeadState;
use crate::idle::IdleState;
use crate::schedule::TaskScheduler;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use steer_core::{EntityId, Tag};

/// Behavior state identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StateKind {
    Idle,
    Chase,
    CloseFollow,
    Dead,
}

impl StateKind {
    pub const ALL: [StateKind; 4] = [
        StateKind::Idle,
        StateKind::Chase,
        StateKind::CloseFollow,
        StateKind::Dead,
    ];

    /// Lowercase name used in logs and summaries
    pub fn name(&self) -> &'static str {
        match self {
            StateKind::Idle => "idle",
            StateKind::Chase => "chase",
            StateKind::CloseFollow => "close_follow",
            StateKind::Dead => "dead",
        }
    }

    /// States this state may request on its own. External callers can still
    /// force any state through `Controller::set_state`.
    pub fn successors(&self) -> &'static [StateKind] {
        match self {
            StateKind::Idle => &[StateKind::Chase],
            StateKind::Chase => &[StateKind::Idle, StateKind::CloseFollow],
            StateKind::CloseFollow => &[StateKind::Idle, StateKind::Chase],
            StateKind::Dead => &[],
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Transition requested from a state's update.
///
/// Carries what the producing state hands to the consumer; the controller
/// writes it into the consumer before activating it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Idle,
    Chase {
        target: EntityId,
        /// Replaces the chase range when present
        range: Option<f32>,
    },
    CloseFollow {
        target: EntityId,
        /// Proposed close-follow range, buffer not yet added
        range: f32,
    },
}

impl Transition {
    /// State the transition activates
    pub fn next(&self) -> StateKind {
        match self {
            Transition::Idle => StateKind::Idle,
            Transition::Chase { .. } => StateKind::Chase,
            Transition::CloseFollow { .. } => StateKind::CloseFollow,
        }
    }
}

/// What a state can see while updating
pub struct Senses<'a> {
    /// The bot
    pub entity: EntityId,
    /// The bot's position this tick
    pub position: Vec3,
    pub perception: &'a dyn Perception,
    pub player_tag: &'a Tag,
}

/// Start/stop bookkeeping shared by every variant
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    active: bool,
    entries: u32,
}

impl Lifecycle {
    pub(crate) fn enter(&mut self) {
        debug_assert!(!self.active, "state started twice without a stop");
        self.active = true;
        self.entries += 1;
    }

    pub(crate) fn exit(&mut self) {
        debug_assert!(self.active, "state stopped without a start");
        self.active = false;
    }

    /// Between a start and its stop
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of starts so far
    pub fn entries(&self) -> u32 {
        self.entries
    }
}

/// One instance of every state, alive for the whole life of the bot
#[derive(Debug)]
pub struct StateSet {
    pub idle: IdleState,
    pub chase: ChaseState,
    pub close_follow: CloseFollowState,
    pub dead: DeadState,
}

impl StateSet {
    /// Build every state from one config
    pub fn from_config(config: &AiConfig) -> Self {
        Self {
            idle: IdleState::from_config(config),
            chase: ChaseState::from_config(config),
            close_follow: CloseFollowState::from_config(config),
            dead: DeadState::new(config.markers.dead.clone()),
        }
    }

    /// Marker of the given state
    pub fn marker(&self, kind: StateKind) -> &Marker {
        match kind {
            StateKind::Idle => self.idle.marker(),
            StateKind::Chase => self.chase.marker(),
            StateKind::CloseFollow => self.close_follow.marker(),
            StateKind::Dead => self.dead.marker(),
        }
    }

    /// Start/stop bookkeeping of the given state
    pub fn lifecycle(&self, kind: StateKind) -> &Lifecycle {
        match kind {
            StateKind::Idle => &self.idle.lifecycle,
            StateKind::Chase => &self.chase.lifecycle,
            StateKind::CloseFollow => &self.close_follow.lifecycle,
            StateKind::Dead => &self.dead.lifecycle,
        }
    }

    pub(crate) fn start(&mut self, kind: StateKind, tasks: &mut TaskScheduler<StateKind>) {
        match kind {
            StateKind::Idle => self.idle.start(tasks),
            StateKind::Chase => self.chase.start(tasks),
            StateKind::CloseFollow => self.close_follow.start(),
            StateKind::Dead => self.dead.start(),
        }
    }

    pub(crate) fn stop(&mut self, kind: StateKind, tasks: &mut TaskScheduler<StateKind>) {
        match kind {
            StateKind::Idle => self.idle.stop(tasks),
            StateKind::Chase => self.chase.stop(tasks),
            StateKind::CloseFollow => self.close_follow.stop(),
            StateKind::Dead => self.dead.stop(),
        }
    }

    pub(crate) fn update(&mut self, kind: StateKind, senses: &Senses<'_>) -> Option<Transition> {
        match kind {
            StateKind::Idle => self.idle.update(senses),
            StateKind::Chase => self.chase.update(senses),
            StateKind::CloseFollow => self.close_follow.update(senses),
            StateKind::Dead => self.dead.update(senses),
        }
    }

    /// Hand the producer's payload to the consuming state
    pub(crate) fn configure(&mut self, transition: &Transition) {
        match *transition {
            Transition::Idle => {}
            Transition::Chase { target, range } => {
                self.chase.set_target(Some(target));
                if let Some(range) = range {
                    self.chase.set_chase_range(range);
                }
            }
            Transition::CloseFollow { target, range } => {
                self.close_follow.set_target(Some(target));
                self.close_follow.set_close_follow_range(range);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_targets() {
        let target = EntityId::new(1, 0);
        assert_eq!(Transition::Idle.next(), StateKind::Idle);
        assert_eq!(Transition::Chase { target, range: None }.next(), StateKind::Chase);
        assert_eq!(
            Transition::CloseFollow { target, range: 2.0 }.next(),
            StateKind::CloseFollow
        );
    }

    #[test]
    fn test_dead_is_terminal() {
        assert!(StateKind::Dead.successors().is_empty());
        for kind in StateKind::ALL {
            assert!(!kind.successors().contains(&StateKind::Dead));
        }
    }

    #[test]
    fn test_configure_chase_with_propagated_range() {
        let mut states = StateSet::from_config(&AiConfig::default());
        let target = EntityId::new(5, 0);
        states.configure(&Transition::Chase { target, range: Some(7.0) });
        assert_eq!(states.chase.target(), Some(target));
        assert_eq!(states.chase.chase_range(), 7.0);
    }

    #[test]
    fn test_configure_close_follow_adds_buffer() {
        let mut states = StateSet::from_config(&AiConfig::default().with_buffer(1.5));
        let target = EntityId::new(5, 0);
        states.configure(&Transition::CloseFollow { target, range: 2.0 });
        assert_eq!(states.close_follow.target(), Some(target));
        assert_eq!(states.close_follow.close_follow_range(), 3.5);
    }

    #[test]
    fn test_markers_per_state() {
        let states = StateSet::from_config(&AiConfig::default());
        assert_eq!(states.marker(StateKind::Idle).name(), "idle");
        assert_eq!(states.marker(StateKind::Chase).name(), "chase");
        assert_eq!(states.marker(StateKind::CloseFollow).name(), "close_combat");
        assert_eq!(states.marker(StateKind::Dead).name(), "dead");
    }
}
