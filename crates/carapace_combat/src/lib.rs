//! # carapace_combat - Damage, Vitals and Attacks
//!
//! # Features
//!
//! - Immutable [`Damage`] values with knockback magnitude
//! - [`ActorStats`] with armor-before-health resolution
//! - Post-hit [`Invulnerability`] windows
//! - Melee, dash and projectile [`AttackCommand`]s with cooldowns
//!
//! # Example
//!
//! ```ignore
//! use carapace_combat::prelude::*;
//!
//! let mut stats = ActorStats::new(2).with_armor(1);
//! let dmg = Damage::new(Vec2::ZERO, 20.0, 1);
//! assert_eq!(stats.absorb(dmg.amount()), DamageResult::ShellBroken);
//!
//! let mut attack = AttackCommand::new(AttackConfig::Dash(DashConfig::default()));
//! attack.start(&motion)?;
//! let outcome = attack.step(&mut AttackContext::new(&mut motion, hostile), dt);
//! ```

pub mod attack;
pub mod damage;
pub mod error;
pub mod invulnerability;
pub mod stats;

pub mod prelude {
    pub use crate::attack::{
        AttackCommand, AttackConfig, AttackContext, AttackOutcome, AttackVariant, DashConfig,
        MeleeConfig, ProjectileConfig, ProjectileSpawn,
    };
    pub use crate::damage::{Damage, Hit};
    pub use crate::error::{AttackError, Result};
    pub use crate::invulnerability::Invulnerability;
    pub use crate::stats::{ActorStats, AttackKind, DamageResult};
}

pub use prelude::*;
