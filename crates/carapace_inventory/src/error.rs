//! Error types for shells

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// No shell with this name in the catalog
    #[error("Unknown shell: {0}")]
    UnknownShell(String),

    /// Two catalog entries share a name
    #[error("Duplicate shell: {0}")]
    DuplicateShell(String),
}

pub type Result<T> = std::result::Result<T, InventoryError>;
