//! Error types for the physics layer

use crate::body::BodyId;
use thiserror::Error;

/// Physics errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// Body not known to the world
    #[error("Body not found: {0:?}")]
    BodyNotFound(BodyId),

    /// Invalid configuration
    #[error("Invalid physics configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
