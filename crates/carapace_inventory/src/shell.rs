//! Shell definitions

use carapace_combat::{AttackConfig, AttackKind};
use carapace_math::Vec2;
use serde::{Deserialize, Serialize};

/// Saved name meaning "no shell equipped"
pub const NO_SHELL: &str = "NoShell";
pub const SNAIL_SHELL: &str = "SnailShell";
pub const SPIKY_SHELL: &str = "SpikyShell";
pub const CONCH_SHELL: &str = "ConchShell";

/// Stats a shell grants while worn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellStats {
    pub name: String,
    #[serde(default)]
    pub armor: i32,
    /// Walking speed (x) and jump height (y)
    #[serde(default = "default_speed")]
    pub speed: Vec2,
    #[serde(default)]
    pub attack: Option<AttackConfig>,
}

fn default_speed() -> Vec2 {
    Vec2::new(4.0, 4.0)
}

impl ShellStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            armor: 0,
            speed: default_speed(),
            attack: None,
        }
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_attack(mut self, attack: AttackConfig) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn attack_kind(&self) -> AttackKind {
        self.attack.as_ref().map(AttackConfig::kind).unwrap_or_default()
    }

    /// Whether wearing this shell still leaves the actor with a plain swing
    pub fn is_melee(&self) -> bool {
        matches!(self.attack_kind(), AttackKind::Melee | AttackKind::None)
    }
}
