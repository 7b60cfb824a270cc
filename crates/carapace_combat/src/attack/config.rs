//! Attack configuration tables

use crate::stats::AttackKind;
use carapace_math::Vec2;
use serde::{Deserialize, Serialize};

/// Melee swing tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeConfig {
    /// Damage per hit
    pub damage: u32,
    /// Knockback magnitude per hit
    pub knockback: f32,
    /// Swing length in seconds
    pub duration: f32,
    /// Half size of the hit-box
    pub reach: Vec2,
    /// Distance from the actor's center to the hit-box center, along the facing
    pub offset: f32,
    /// Recovery after a swing before the next one may start
    pub cooldown: f32,
}

impl Default for MeleeConfig {
    fn default() -> Self {
        Self {
            damage: 1,
            knockback: 20.0,
            duration: 0.3,
            reach: Vec2::new(0.5, 0.5),
            offset: 0.75,
            cooldown: 0.0,
        }
    }
}

/// Dash tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Maximum distance covered by one dash
    pub distance: f32,
    /// Horizontal speed held during the dash
    pub speed: f32,
    /// Damage dealt to each hostile touched
    pub damage: u32,
    pub knockback: f32,
    pub cooldown: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            speed: 12.0,
            damage: 1,
            knockback: 20.0,
            cooldown: 1.0,
        }
    }
}

/// Projectile tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Launch speed
    pub speed: f32,
    /// Spawn distance in front of the actor
    pub offset: f32,
    /// Damage carried by the projectile
    pub damage: u32,
    pub knockback: f32,
    pub cooldown: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 8.0,
            offset: 1.0,
            damage: 1,
            knockback: 20.0,
            cooldown: 1.0,
        }
    }
}

/// One attack table, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AttackConfig {
    Melee(MeleeConfig),
    Dash(DashConfig),
    Projectile(ProjectileConfig),
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self::Melee(MeleeConfig::default())
    }
}

impl AttackConfig {
    pub fn kind(&self) -> AttackKind {
        match self {
            Self::Melee(_) => AttackKind::Melee,
            Self::Dash(_) => AttackKind::Dash,
            Self::Projectile(_) => AttackKind::Projectile,
        }
    }

    pub fn damage(&self) -> u32 {
        match self {
            Self::Melee(c) => c.damage,
            Self::Dash(c) => c.damage,
            Self::Projectile(c) => c.damage,
        }
    }

    pub fn cooldown(&self) -> f32 {
        match self {
            Self::Melee(c) => c.cooldown,
            Self::Dash(c) => c.cooldown,
            Self::Projectile(c) => c.cooldown,
        }
    }
}
