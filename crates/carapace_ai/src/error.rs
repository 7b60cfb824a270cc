//! Error types for state machines

use thiserror::Error;

/// Rejected state transition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The machine sits in a terminal state and never leaves it
    #[error("Cannot leave terminal state {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, TransitionError>;
