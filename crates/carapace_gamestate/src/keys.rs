//! Persistence keys

pub const ARMOR: &str = "Armor";
pub const COINS: &str = "Coins";
pub const HEALTH: &str = "Health";
pub const SHELL: &str = "Shell";
pub const REDEEM_AMOUNT: &str = "RedeemAmount";

/// Every key the game reads or writes
pub const ALL: [&str; 5] = [ARMOR, COINS, HEALTH, SHELL, REDEEM_AMOUNT];
