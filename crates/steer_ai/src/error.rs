//! Error types for the AI core

use thiserror::Error;

/// Errors surfaced to the embedding application.
///
/// Runtime anomalies (missing target, missing collaborator, out-of-range
/// radius) never show up here; they degrade to a transition or a no-op.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AiError {
    /// `initialize` was called on a controller that already has a state
    #[error("Controller for entity {0} is already initialized")]
    AlreadyInitialized(steer_core::EntityId),

    /// Tuning values that cannot be corrected by clamping
    #[error("Invalid AI configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for AI operations
pub type Result<T> = std::result::Result<T, AiError>;
