//! Steer Sim - Headless Host for Bot AI
//!
//! Stands in for the game engine around `steer_ai`: a world of tagged
//! entities answers perception queries, nav agents turn destinations into
//! movement, a marker board plays the renderer, and a scripted player gives
//! the bots something to chase.

pub mod agent;
pub mod config;
pub mod error;
pub mod markers;
pub mod player;
pub mod simulation;
pub mod world;

pub mod prelude {
    pub use crate::agent::NavAgent;
    pub use crate::config::{BotSpawn, PlayerConfig, SimConfig, SimSettings};
    pub use crate::error::{Result, SimError};
    pub use crate::markers::MarkerBoard;
    pub use crate::player::ScriptedPlayer;
    pub use crate::simulation::{BotSummary, RunSummary, SimBot, Simulation};
    pub use crate::world::SimWorld;
}

pub use prelude::*;
