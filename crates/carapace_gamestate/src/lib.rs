//! # carapace_gamestate - Persistence
//!
//! The game saves a handful of string-keyed values between sessions. The
//! storage itself is external; this crate names the keys, defines the
//! [`Persistence`] seam and ships an in-memory store.
//!
//! # Features
//!
//! - `Armor`, `Coins`, `Health`, `Shell` and `RedeemAmount` keys
//! - Thread-safe [`MemoryStore`] with JSON snapshots
//! - [`PlayerProgress`] load/save with fresh-start defaults
//!
//! # Example
//!
//! ```ignore
//! use carapace_gamestate::prelude::*;
//!
//! let store = MemoryStore::new();
//! let progress = PlayerProgress::load(&store, DEFAULT_HEALTH);
//! progress.save(&store);
//! ```

pub mod keys;
pub mod progress;
pub mod store;

pub mod prelude {
    pub use crate::keys;
    pub use crate::progress::{
        redeem_amount, PlayerProgress, DEFAULT_HEALTH, DEFAULT_REDEEM_AMOUNT, NO_SHELL,
    };
    pub use crate::store::{MemoryStore, Persistence, StoreError};
}

pub use prelude::*;
