//! Player progress carried between levels

use crate::keys;
use crate::store::Persistence;
use serde::{Deserialize, Serialize};

/// Saved name of an empty shell slot
pub const NO_SHELL: &str = "NoShell";
pub const DEFAULT_HEALTH: i32 = 2;
pub const DEFAULT_REDEEM_AMOUNT: i32 = 20;

/// Snapshot of what the player keeps across levels and deaths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub shell: String,
    pub health: i32,
    pub armor: i32,
    pub coins: i32,
}

impl Default for PlayerProgress {
    fn default() -> Self {
        Self {
            shell: NO_SHELL.to_string(),
            health: DEFAULT_HEALTH,
            armor: 0,
            coins: 0,
        }
    }
}

impl PlayerProgress {
    /// Read progress, falling back to a fresh start for missing keys
    pub fn load(store: &dyn Persistence, default_health: i32) -> Self {
        Self {
            shell: store.get_string(keys::SHELL, NO_SHELL),
            health: store.get_int(keys::HEALTH, default_health),
            armor: store.get_int(keys::ARMOR, 0),
            coins: store.get_int(keys::COINS, 0),
        }
    }

    /// Write every field
    pub fn save(&self, store: &dyn Persistence) {
        store.set_string(keys::SHELL, &self.shell);
        store.set_int(keys::HEALTH, self.health);
        store.set_int(keys::ARMOR, self.armor);
        store.set_int(keys::COINS, self.coins);
        log::info!(
            "Progress saved: shell={} health={} armor={} coins={}",
            self.shell,
            self.health,
            self.armor,
            self.coins
        );
    }

    pub fn has_shell(&self) -> bool {
        self.shell != NO_SHELL
    }
}

/// Coins needed for a redemption
pub fn redeem_amount(store: &dyn Persistence, default: i32) -> i32 {
    store.get_int(keys::REDEEM_AMOUNT, default).max(1)
}
