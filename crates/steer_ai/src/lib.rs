//! Steer AI - Bot Behavior State Machine
//!
//! Decides which behavior a bot is in and when it switches:
//!
//! - **Idle**: wander around, watch for a player
//! - **Chase**: follow the detected player, re-targeting on a slow cadence
//! - **CloseFollow**: stick to a player within close range
//! - **Dead**: terminal, forced by the host
//!
//! Movement, perception and rendering are supplied by the host through the
//! traits in [`collaborator`].
//!
//! # Example
//!
//! ```ignore
//! use steer_ai::prelude::*;
//!
//! let mut bot = Controller::new(entity, &AiConfig::default())?
//!     .with_movement(nav_agent)
//!     .with_renderer(marker_sink);
//! bot.initialize()?;
//!
//! // Each frame:
//! bot.tick(dt, &world);
//! ```

pub mod chase;
pub mod close_follow;
pub mod collaborator;
pub mod config;
pub mod controller;
pub mod dead;
pub mod error;
pub mod idle;
pub mod perception;
pub mod range;
pub mod schedule;
pub mod state;

pub mod prelude {
    pub use crate::chase::ChaseState;
    pub use crate::close_follow::CloseFollowState;
    pub use crate::collaborator::{Marker, Movement, Perception, Renderer};
    pub use crate::config::{AiConfig, ChaseConfig, CloseFollowConfig, IdleConfig, MarkerConfig};
    pub use crate::controller::Controller;
    pub use crate::dead::DeadState;
    pub use crate::error::{AiError, Result};
    pub use crate::idle::IdleState;
    pub use crate::schedule::{Cadence, TaskId, TaskScheduler};
    pub use crate::state::{Lifecycle, StateKind, StateSet, Transition};
}

pub use prelude::*;
