//! Error types for the game layer

use carapace_ai::TransitionError;
use carapace_inventory::InventoryError;
use thiserror::Error;

/// Errors raised while reading the configuration asset
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but describes an impossible game
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<InventoryError> for ConfigError {
    fn from(err: InventoryError) -> Self {
        Self::Invalid(err.to_string())
    }
}

/// Errors raised while building or running actors
#[derive(Debug, Error)]
pub enum GameError {
    /// An enemy was built without a player to look for, or the player body
    /// is unknown to the collision probe
    #[error("Player not found")]
    MissingPlayer,

    #[error("Unknown enemy kind: {0}")]
    UnknownEnemy(String),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("State transition failed: {0}")]
    Transition(#[from] TransitionError),
}

pub type Result<T> = std::result::Result<T, GameError>;
