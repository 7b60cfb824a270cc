//! Error types for combat

use thiserror::Error;

/// Rejected attack dispatch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttackError {
    /// Another swing, dash or shot is still running
    #[error("Attack already running")]
    AlreadyRunning,

    /// The attack is recovering from its last use
    #[error("Attack cooling down for {remaining:.2}s")]
    CoolingDown { remaining: f32 },

    /// The actor carries no attack at all
    #[error("No attack equipped")]
    Unarmed,
}

/// Result type for combat operations
pub type Result<T> = std::result::Result<T, AttackError>;
