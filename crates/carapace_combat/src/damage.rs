//! Damage values

use carapace_math::Vec2;
use carapace_physics::BodyId;
use serde::{Deserialize, Serialize};

/// One instance of damage.
///
/// Immutable once built. The knockback direction is not stored: it is
/// derived from `source` when the damage lands on a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    source: Vec2,
    raw_amount: u32,
    knockback: f32,
}

impl Damage {
    /// Damage dealt from `source`
    pub fn new(source: Vec2, knockback: f32, raw_amount: u32) -> Self {
        Self {
            source,
            raw_amount,
            knockback,
        }
    }

    pub fn source(&self) -> Vec2 {
        self.source
    }

    pub fn raw_amount(&self) -> u32 {
        self.raw_amount
    }

    /// Raw amount as a signed stat delta
    pub fn amount(&self) -> i32 {
        i32::try_from(self.raw_amount).unwrap_or(i32::MAX)
    }

    /// Knockback magnitude, zero means no knockback
    pub fn knockback(&self) -> f32 {
        self.knockback
    }

    pub fn has_knockback(&self) -> bool {
        self.knockback != 0.0
    }

    /// Same damage with its knockback scaled
    pub fn with_knockback_scaled(self, factor: f32) -> Self {
        Self {
            knockback: self.knockback * factor,
            ..self
        }
    }
}

/// Damage an attack wants delivered to a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub target: BodyId,
    pub damage: Damage,
}

impl Hit {
    pub fn new(target: BodyId, damage: Damage) -> Self {
        Self { target, damage }
    }
}
