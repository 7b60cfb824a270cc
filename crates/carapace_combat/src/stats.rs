//! Actor stats and damage resolution

use carapace_math::Vec2;
use serde::{Deserialize, Serialize};

/// Which attack an actor can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    #[default]
    None,
    Melee,
    Dash,
    Projectile,
}

/// What a single damage application did to an actor's stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageResult {
    /// Armor absorbed the hit and some armor is left
    ArmorHit { armor: i32 },
    /// Armor dropped to zero or below
    ShellBroken,
    /// Health was reduced and the actor lives
    HealthHit { health: i32 },
    /// Health dropped to zero or below
    Killed,
}

impl DamageResult {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Killed)
    }
}

/// Health, armor and speed of an actor.
///
/// Health and armor may go negative on an overkill hit; use the `display_*`
/// accessors for values shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorStats {
    pub max_health: i32,
    pub current_health: i32,
    pub armor: i32,
    pub speed: Vec2,
    pub attack_kind: AttackKind,
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ActorStats {
    /// Full health, no armor, no attack
    pub fn new(max_health: i32) -> Self {
        let max_health = max_health.max(1);
        Self {
            max_health,
            current_health: max_health,
            armor: 0,
            speed: Vec2::new(4.0, 4.0),
            attack_kind: AttackKind::None,
        }
    }

    pub fn with_current_health(mut self, health: i32) -> Self {
        self.current_health = health.min(self.max_health);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor.max(0);
        self
    }

    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_attack_kind(mut self, kind: AttackKind) -> Self {
        self.attack_kind = kind;
        self
    }

    /// Apply `amount` to armor if any is left, otherwise to health.
    ///
    /// Surplus damage on armor does not carry over into health.
    pub fn absorb(&mut self, amount: i32) -> DamageResult {
        let amount = amount.max(0);
        if self.armor > 0 {
            self.armor = self.armor.saturating_sub(amount);
            if self.armor <= 0 {
                DamageResult::ShellBroken
            } else {
                DamageResult::ArmorHit { armor: self.armor }
            }
        } else {
            self.current_health = self.current_health.saturating_sub(amount);
            if self.current_health <= 0 {
                DamageResult::Killed
            } else {
                DamageResult::HealthHit {
                    health: self.current_health,
                }
            }
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current_health <= 0
    }

    /// Restore health up to `max_health`; returns the amount healed
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current_health;
        self.current_health = (self.current_health + amount.max(0)).min(self.max_health);
        self.current_health - before
    }

    pub fn add_armor(&mut self, amount: i32) {
        self.armor = self.armor.max(0) + amount.max(0);
    }

    pub fn display_health(&self) -> i32 {
        self.current_health.max(0)
    }

    pub fn display_armor(&self) -> i32 {
        self.armor.max(0)
    }
}
