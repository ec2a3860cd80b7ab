//! Error types for the simulation host

use steer_ai::AiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Config file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `SimConfig`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Simulation settings that cannot run
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(String),

    /// Bot controller rejected its setup
    #[error(transparent)]
    Ai(#[from] AiError),
}

pub type Result<T> = std::result::Result<T, SimError>;
