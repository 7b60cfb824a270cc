//! Game configuration asset
//!
//! One TOML document holds the player tuning, the base (unarmoured) shell,
//! the shell catalog and every enemy kind. Every numeric field has a default,
//! so a minimal document only needs the entries it wants to change.
//!
//! ```toml
//! redeem_shell = "SnailShell"
//!
//! [player]
//! max_health = 3
//!
//! [base_shell]
//! name = "NoShell"
//! attack = { kind = "melee" }
//!
//! [[shells]]
//! name = "SpikyShell"
//! armor = 2
//! speed = { x = 5.0, y = 4.0 }
//! attack = { kind = "dash", distance = 4.0 }
//!
//! [enemies.crab]
//! max_health = 2
//! drop_shell = "SpikyShell"
//!
//! [enemies.crab.vision]
//! field_of_view = 120.0
//! ```

use crate::error::{ConfigError, GameError};
use carapace_ai::VisionConfig;
use carapace_combat::{AttackConfig, MeleeConfig};
use carapace_inventory::{ShellCatalog, ShellStats, NO_SHELL};
use carapace_math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_health: i32,
    /// Health on a fresh start, when nothing is saved yet
    pub default_health: i32,
    /// Seconds of invulnerability after a non-fatal hit
    pub invulnerability: f32,
    pub knockback_duration: f32,
    /// Walking speed multiplier while hiding
    pub hide_speed_factor: f32,
    /// Extra jump height after hiding for `hide_charge_time`
    pub hide_jump_bonus: f32,
    pub hide_charge_time: f32,
    /// Gravity scale applied while standing on the ground
    pub grounded_gravity: f32,
    /// Releasing jump sets gravity to `speed.y * jump_release_gravity_factor`
    pub jump_release_gravity_factor: f32,
    /// Seconds between death and body teardown
    pub teardown_delay: f32,
    pub default_redeem_amount: i32,
    /// Damage dealt by spikes
    pub hazard_damage: u32,
    pub dash_particles: u32,
    pub half_extents: Vec2,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 3,
            default_health: 2,
            invulnerability: 1.0,
            knockback_duration: 0.25,
            hide_speed_factor: 0.4,
            hide_jump_bonus: 2.5,
            hide_charge_time: 1.0,
            grounded_gravity: 3.0,
            jump_release_gravity_factor: 0.8,
            teardown_delay: 1.0,
            default_redeem_amount: 20,
            hazard_damage: 1,
            dash_particles: 20,
            half_extents: Vec2::new(0.5, 0.5),
        }
    }
}

/// One enemy kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub max_health: i32,
    pub armor: i32,
    pub walking_speed: f32,
    /// Scales the knockback of every hit taken
    pub knockback_factor: f32,
    /// Damage dealt to the player on body contact
    pub collision_damage: u32,
    pub collision_knockback: f32,
    pub vision: VisionConfig,
    /// Distance to the player at which the enemy starts attacking
    pub attack_range: f32,
    pub invulnerability: f32,
    pub knockback_duration: f32,
    /// Shell left behind on death
    pub drop_shell: Option<String>,
    pub attack: Option<AttackConfig>,
    pub hurt_particles: u32,
    pub half_extents: Vec2,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            max_health: 2,
            armor: 0,
            walking_speed: 2.0,
            knockback_factor: 1.0,
            collision_damage: 1,
            collision_knockback: 20.0,
            vision: VisionConfig::default(),
            attack_range: 1.0,
            invulnerability: 0.3,
            knockback_duration: 0.25,
            drop_shell: None,
            attack: None,
            hurt_particles: 12,
            half_extents: Vec2::new(0.5, 0.5),
        }
    }
}

impl EnemyConfig {
    pub fn with_max_health(mut self, health: i32) -> Self {
        self.max_health = health;
        self
    }

    pub fn with_walking_speed(mut self, speed: f32) -> Self {
        self.walking_speed = speed;
        self
    }

    pub fn with_vision(mut self, vision: VisionConfig) -> Self {
        self.vision = vision;
        self
    }

    pub fn with_attack(mut self, attack: AttackConfig) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_drop_shell(mut self, shell: impl Into<String>) -> Self {
        self.drop_shell = Some(shell.into());
        self
    }

    pub fn with_invulnerability(mut self, seconds: f32) -> Self {
        self.invulnerability = seconds;
        self
    }
}

/// The whole configuration asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    /// Stats the player falls back to without a shell
    pub base_shell: ShellStats,
    pub shells: Vec<ShellStats>,
    /// Shell handed out when coins are redeemed without a shell
    pub redeem_shell: Option<String>,
    pub enemies: BTreeMap<String, EnemyConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            base_shell: ShellStats::new(NO_SHELL).with_attack(AttackConfig::Melee(MeleeConfig::default())),
            shells: Vec::new(),
            redeem_shell: None,
            enemies: BTreeMap::new(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!(
            "Loaded game config from {}: {} shells, {} enemy kinds",
            path.display(),
            config.shells.len(),
            config.enemies.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        if player.max_health < 1 {
            return Err(invalid("player.max_health must be at least 1"));
        }
        if player.default_health < 1 {
            return Err(invalid("player.default_health must be at least 1"));
        }
        check_non_negative("player.invulnerability", player.invulnerability)?;
        check_non_negative("player.knockback_duration", player.knockback_duration)?;
        check_non_negative("player.hide_speed_factor", player.hide_speed_factor)?;
        check_non_negative("player.teardown_delay", player.teardown_delay)?;
        check_half_extents("player.half_extents", player.half_extents)?;

        check_shell(&self.base_shell)?;
        for shell in &self.shells {
            check_shell(shell)?;
        }

        // Names must resolve, so build the catalog once
        let catalog = self.catalog()?;

        for (name, enemy) in &self.enemies {
            if enemy.max_health < 1 {
                return Err(invalid(format!("enemies.{name}.max_health must be at least 1")));
            }
            if enemy.armor < 0 {
                return Err(invalid(format!("enemies.{name}.armor is negative")));
            }
            check_non_negative(&format!("enemies.{name}.walking_speed"), enemy.walking_speed)?;
            check_non_negative(&format!("enemies.{name}.knockback_factor"), enemy.knockback_factor)?;
            check_non_negative(&format!("enemies.{name}.attack_range"), enemy.attack_range)?;
            check_non_negative(&format!("enemies.{name}.invulnerability"), enemy.invulnerability)?;
            check_half_extents(&format!("enemies.{name}.half_extents"), enemy.half_extents)?;
            let vision = &enemy.vision;
            if !(vision.field_of_view > 0.0 && vision.field_of_view <= 360.0) {
                return Err(invalid(format!("enemies.{name}.vision.field_of_view must be in (0, 360]")));
            }
            check_non_negative(&format!("enemies.{name}.vision.vision_range"), vision.vision_range)?;
            check_non_negative(&format!("enemies.{name}.vision.detection_range"), vision.detection_range)?;
            if let Some(attack) = &enemy.attack {
                check_attack(&format!("enemies.{name}.attack"), attack)?;
            }
            if let Some(shell) = &enemy.drop_shell {
                if !catalog.contains(shell) {
                    return Err(invalid(format!("enemies.{name}.drop_shell: unknown shell {shell:?}")));
                }
            }
        }
        Ok(())
    }

    /// Catalog of every configured shell, with the redeem shell set
    pub fn catalog(&self) -> Result<ShellCatalog, ConfigError> {
        let catalog = ShellCatalog::from_shells(self.shells.iter().cloned())?;
        Ok(match &self.redeem_shell {
            Some(name) => catalog.with_redeem_shell(name.as_str())?,
            None => catalog,
        })
    }

    pub fn enemy(&self, kind: &str) -> Result<&EnemyConfig, GameError> {
        self.enemies
            .get(kind)
            .ok_or_else(|| GameError::UnknownEnemy(kind.to_string()))
    }

    pub fn with_shell(mut self, shell: ShellStats) -> Self {
        self.shells.push(shell);
        self
    }

    pub fn with_enemy(mut self, kind: impl Into<String>, enemy: EnemyConfig) -> Self {
        self.enemies.insert(kind.into(), enemy);
        self
    }

    pub fn with_redeem_shell(mut self, name: impl Into<String>) -> Self {
        self.redeem_shell = Some(name.into());
        self
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be a non-negative number, got {value}")))
    }
}

fn check_half_extents(field: &str, half: Vec2) -> Result<(), ConfigError> {
    if half.x > 0.0 && half.y > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be positive")))
    }
}

fn check_shell(shell: &ShellStats) -> Result<(), ConfigError> {
    if shell.armor < 0 {
        return Err(invalid(format!("shell {}: armor is negative", shell.name)));
    }
    check_non_negative(&format!("shell {}: speed.x", shell.name), shell.speed.x)?;
    check_non_negative(&format!("shell {}: speed.y", shell.name), shell.speed.y)?;
    if let Some(attack) = &shell.attack {
        check_attack(&format!("shell {}: attack", shell.name), attack)?;
    }
    Ok(())
}

fn check_attack(field: &str, attack: &AttackConfig) -> Result<(), ConfigError> {
    check_non_negative(&format!("{field}.cooldown"), attack.cooldown())?;
    match attack {
        AttackConfig::Melee(melee) => {
            check_non_negative(&format!("{field}.duration"), melee.duration)?;
            check_half_extents(&format!("{field}.reach"), melee.reach)
        }
        AttackConfig::Dash(dash) => {
            check_non_negative(&format!("{field}.distance"), dash.distance)?;
            check_non_negative(&format!("{field}.speed"), dash.speed)
        }
        AttackConfig::Projectile(projectile) => {
            check_non_negative(&format!("{field}.speed"), projectile.speed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carapace_combat::AttackKind;
    use carapace_inventory::{SNAIL_SHELL, SPIKY_SHELL};

    const DOCUMENT: &str = r#"
        redeem_shell = "SnailShell"

        [player]
        max_health = 4
        invulnerability = 0.5

        [base_shell]
        name = "NoShell"
        attack = { kind = "melee", damage = 1 }

        [[shells]]
        name = "SnailShell"
        armor = 2
        speed = { x = 3.0, y = 4.0 }
        attack = { kind = "melee" }

        [[shells]]
        name = "SpikyShell"
        armor = 2
        attack = { kind = "dash", distance = 3.0, speed = 10.0 }

        [enemies.crab]
        max_health = 3
        knockback_factor = 0.5
        drop_shell = "SpikyShell"
        attack = { kind = "melee" }

        [enemies.crab.vision]
        field_of_view = 120.0
        vision_range = 6.0
    "#;

    #[test]
    fn test_parse_document() {
        let config = GameConfig::from_toml_str(DOCUMENT).unwrap();
        assert_eq!(config.player.max_health, 4);
        assert_eq!(config.player.default_health, 2);
        assert_eq!(config.player.hide_jump_bonus, 2.5);
        assert_eq!(config.base_shell.attack_kind(), AttackKind::Melee);
        assert_eq!(config.shells.len(), 2);

        let crab = config.enemy("crab").unwrap();
        assert_eq!(crab.max_health, 3);
        assert_eq!(crab.collision_damage, 1);
        assert_eq!(crab.vision.field_of_view, 120.0);
        assert_eq!(crab.vision.detection_range, 1.0);
        assert_eq!(crab.drop_shell.as_deref(), Some(SPIKY_SHELL));

        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.redeem_shell().unwrap().name, SNAIL_SHELL);
        assert_eq!(catalog.get(SPIKY_SHELL).unwrap().attack_kind(), AttackKind::Dash);
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = GameConfig::from_toml_str("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert!(config.catalog().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_enemy() {
        let config = GameConfig::default();
        assert!(matches!(config.enemy("gull"), Err(GameError::UnknownEnemy(name)) if name == "gull"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let config = GameConfig::default().with_enemy("crab", EnemyConfig::default().with_max_health(0));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig::default().with_enemy("crab", EnemyConfig::default().with_drop_shell("Pebble"));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig::default().with_redeem_shell("Pebble");
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig::default()
            .with_shell(ShellStats::new(SNAIL_SHELL))
            .with_shell(ShellStats::new(SNAIL_SHELL));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            GameConfig::from_toml_str("[player]\nmax_health = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            GameConfig::load("/nonexistent/carapace.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
