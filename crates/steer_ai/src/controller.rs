//! The per-bot FSM context
//!
//! A [`Controller`] owns the four state instances, the current-state pointer,
//! the task scheduler that runs state background work, and the optional movement
//! and rendering collaborators. The host calls [`Controller::tick`] once per
//! frame with a view of the world.

use crate::collaborator::{Marker, Movement, Perception, Renderer};
use crate::config::AiConfig;
use crate::error::{AiError, Result};
use crate::schedule::TaskScheduler;
use crate::state::{Senses, StateKind, StateSet, Transition};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use steer_core::{EntityId, Tag};

pub struct Controller {
    entity: EntityId,
    player_tag: Tag,
    states: StateSet,
    current: Option<StateKind>,
    position: Vec3,
    movement: Option<Box<dyn Movement>>,
    renderer: Option<Box<dyn Renderer>>,
    tasks: TaskScheduler<StateKind>,
    rng: StdRng,
    transitions: u64,
}

impl Controller {
    /// Build the state set for `entity`. The controller has no current state
    /// until [`initialize`](Self::initialize) is called.
    pub fn new(entity: EntityId, config: &AiConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            entity,
            player_tag: Tag::new(&config.player_tag),
            states: StateSet::from_config(config),
            current: None,
            position: Vec3::ZERO,
            movement: None,
            renderer: None,
            tasks: TaskScheduler::new(),
            rng: StdRng::from_entropy(),
            transitions: 0,
        })
    }

    /// Deterministic wander sampling and interval jitter
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Starting position, used until the host reports one
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Attach the agent that receives destinations
    pub fn with_movement(mut self, movement: impl Movement + 'static) -> Self {
        self.movement = Some(Box::new(movement));
        self
    }

    /// Attach the renderer that receives markers
    pub fn with_renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    /// Enter the idle state. Must happen exactly once, before the first tick.
    pub fn initialize(&mut self) -> Result<()> {
        if self.current.is_some() {
            return Err(AiError::AlreadyInitialized(self.entity));
        }
        if self.movement.is_none() {
            log::warn!("Bot {} has no movement agent; destinations are dropped", self.entity);
        }
        if self.renderer.is_none() {
            log::warn!("Bot {} has no renderer; state markers are dropped", self.entity);
        }

        self.set_state(StateKind::Idle);
        Ok(())
    }

    /// Run one frame: the current state's update, then any due background tasks.
    pub fn tick(&mut self, dt: f32, perception: &dyn Perception) {
        let Some(current) = self.current else {
            return;
        };

        if let Some(position) = perception.position_of(self.entity) {
            self.position = position;
        }

        let senses = Senses {
            entity: self.entity,
            position: self.position,
            perception,
            player_tag: &self.player_tag,
        };
        if let Some(transition) = self.states.update(current, &senses) {
            self.apply(current, transition);
        }

        for (task, owner) in self.tasks.advance(dt, &mut self.rng) {
            if !self.tasks.is_active(task) {
                continue;
            }
            self.run_task(owner, perception);
        }
    }

    /// Stop the current state (if any), make `next` current and start it.
    ///
    /// Re-entering the current state is not filtered: it is stopped and
    /// started again.
    pub fn set_state(&mut self, next: StateKind) {
        if let Some(previous) = self.current {
            self.states.stop(previous, &mut self.tasks);
            log::debug!("Bot {}: {} -> {}", self.entity, previous, next);
            self.transitions += 1;
        }

        self.current = Some(next);
        let marker = self.states.marker(next).clone();
        self.change_marker(&marker);
        self.states.start(next, &mut self.tasks);
    }

    /// Forward a destination to the movement agent, if there is one
    pub fn update_destination(&mut self, position: Vec3) {
        if let Some(movement) = self.movement.as_mut() {
            movement.set_destination(position);
        }
    }

    /// Forward a marker to the renderer, if there is one
    pub fn change_marker(&mut self, marker: &Marker) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.apply_marker(self.entity, marker);
        }
    }

    /// The bot this controller drives
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// `None` only before [`initialize`](Self::initialize)
    pub fn current_state(&self) -> Option<StateKind> {
        self.current
    }

    /// The four state instances
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// Direct access for hosts that retune or retarget states at runtime
    pub fn states_mut(&mut self) -> &mut StateSet {
        &mut self.states
    }

    /// Background tasks of the current state
    pub fn tasks(&self) -> &TaskScheduler<StateKind> {
        &self.tasks
    }

    /// Position used by the last tick
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Override the position until the next tick refreshes it
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Number of state changes after initialization
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    fn apply(&mut self, from: StateKind, transition: Transition) {
        let next = transition.next();
        debug_assert!(
            from.successors().contains(&next),
            "{} may not request {}",
            from,
            next
        );
        self.states.configure(&transition);
        self.set_state(next);
    }

    fn run_task(&mut self, owner: StateKind, perception: &dyn Perception) {
        match owner {
            StateKind::Idle => {
                let destination = self.states.idle.wander(self.position, &mut self.rng);
                log::trace!("Bot {} wanders to {:?}", self.entity, destination);
                self.update_destination(destination);
            }
            StateKind::Chase => {
                if let Some(destination) = self.states.chase.retarget(perception) {
                    log::trace!("Bot {} chases toward {:?}", self.entity, destination);
                    self.update_destination(destination);
                }
            }
            StateKind::CloseFollow | StateKind::Dead => {}
        }
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("entity", &self.entity)
            .field("current", &self.current)
            .field("position", &self.position)
            .field("has_movement", &self.movement.is_some())
            .field("has_renderer", &self.renderer.is_some())
            .field("tasks", &self.tasks.len())
            .finish()
    }
}
