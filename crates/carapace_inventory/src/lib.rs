//! # carapace_inventory - Shells
//!
//! Shells are the only equipment: a worn shell grants armor, a speed
//! profile and an attack. The player has a single [`ShellSlot`].
//!
//! # Example
//!
//! ```ignore
//! use carapace_inventory::prelude::*;
//!
//! let catalog = ShellCatalog::from_shells(config.shells)?.with_redeem_shell(SNAIL_SHELL)?;
//! let mut slot = ShellSlot::new();
//! if let Some(shell) = catalog.spawn(SNAIL_SHELL) {
//!     slot.equip(shell, 0);
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod shell;
pub mod slot;

pub mod prelude {
    pub use crate::catalog::ShellCatalog;
    pub use crate::error::{InventoryError, Result};
    pub use crate::shell::{ShellStats, CONCH_SHELL, NO_SHELL, SNAIL_SHELL, SPIKY_SHELL};
    pub use crate::slot::ShellSlot;
}

pub use prelude::*;
