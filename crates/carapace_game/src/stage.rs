//! A level: one player, its enemies and the hits between them

use crate::config::GameConfig;
use crate::enemy::Enemy;
use crate::error::{GameError, Result};
use crate::player::{Player, PlayerInput};
use crate::services::Services;
use carapace_combat::{DamageResult, Hit};
use carapace_inventory::ShellCatalog;
use carapace_math::Facing;
use carapace_physics::{Body, BodyId};
use std::sync::Arc;

/// A hit that got through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landed {
    pub target: BodyId,
    pub result: DamageResult,
}

/// Owns the actors of a level and routes hits to them.
///
/// The stage does not step physics; the host advances its world between
/// calls to [`tick`](Self::tick).
#[derive(Debug)]
pub struct Stage {
    config: GameConfig,
    catalog: Arc<ShellCatalog>,
    services: Services,
    player: Option<Player>,
    enemies: Vec<Enemy>,
}

impl Stage {
    /// Build an empty stage; fails when the shell catalog is invalid
    pub fn new(config: GameConfig, services: Services) -> Result<Self> {
        let catalog = Arc::new(config.catalog()?);
        log::info!("Stage ready with {} shells and {} enemy kinds", catalog.len(), config.enemies.len());
        Ok(Self {
            config,
            catalog,
            services,
            player: None,
            enemies: Vec::new(),
        })
    }

    /// Spawn the player around `body`, replacing any previous one
    pub fn spawn_player(&mut self, body: Box<dyn Body>) -> Result<BodyId> {
        let player = Player::spawn(&self.config, self.catalog.clone(), body, self.services.clone())?;
        let id = player.body_id();
        self.player = Some(player);
        Ok(id)
    }

    /// Spawn an enemy of a configured kind; the player must exist first
    pub fn spawn_enemy(&mut self, kind: &str, body: Box<dyn Body>, facing: Facing) -> Result<BodyId> {
        let config = self.config.enemy(kind)?.clone();
        let drop_shell = config.drop_shell.as_deref().and_then(|name| self.catalog.spawn(name));
        let player = self.player.as_ref().map(Player::body_id);
        let enemy = Enemy::new(kind, config, body, self.services.clone(), player)?
            .with_drop_shell(drop_shell)
            .with_facing(facing);
        let id = enemy.body_id();
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Configuration the stage was built from
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shells known to this stage
    pub fn catalog(&self) -> &Arc<ShellCatalog> {
        &self.catalog
    }

    /// The player, once spawned
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// The player, once spawned
    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    /// Living enemies in spawn order
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Living enemy by body
    pub fn enemy(&self, id: BodyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.body_id() == id)
    }

    /// Living enemy by body
    pub fn enemy_mut(&mut self, id: BodyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.body_id() == id)
    }

    /// Advance every actor one frame and resolve the hits they produced.
    ///
    /// Fails with [`GameError::MissingPlayer`] before the player is spawned.
    pub fn tick(&mut self, input: PlayerInput, delta_time: f32) -> Result<Vec<Landed>> {
        let player = self.player.as_mut().ok_or(GameError::MissingPlayer)?;
        let mut hits = player.tick(input, delta_time);
        for enemy in &mut self.enemies {
            hits.extend(enemy.tick(delta_time));
        }
        hits.extend(self.services.scene.advance(delta_time));

        let landed = hits.into_iter().filter_map(|hit| self.route(hit)).collect();
        self.enemies.retain(|enemy| {
            if enemy.is_dead() {
                log::debug!("Removing dead {} {:?}", enemy.kind(), enemy.body_id());
            }
            !enemy.is_dead()
        });
        Ok(landed)
    }

    fn route(&mut self, hit: Hit) -> Option<Landed> {
        let result = match self.player.as_mut() {
            Some(player) if player.body_id() == hit.target => player.take_damage(&hit.damage),
            _ => self.enemy_mut(hit.target)?.take_damage(&hit.damage),
        }?;
        Some(Landed {
            target: hit.target,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnemyConfig;
    use crate::sinks::Recorder;
    use carapace_gamestate::MemoryStore;
    use carapace_math::Vec2;
    use carapace_physics::{BodyDesc, CollisionLayer, SandboxWorld};

    fn stage() -> (SandboxWorld, Stage) {
        let world = SandboxWorld::default();
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        let recorder = Arc::new(Recorder::new());
        let services = Services::new(Arc::new(world.clone()), Arc::new(MemoryStore::new()))
            .with_presentation(recorder.clone())
            .with_scene(recorder);
        let config = GameConfig::default().with_enemy("crab", EnemyConfig::default());
        (world, Stage::new(config, services).unwrap())
    }

    #[test]
    fn test_enemy_needs_player() {
        let (world, mut stage) = stage();
        let body = world.spawn_body(BodyDesc::new(Vec2::new(3.0, 0.5)).with_layer(CollisionLayer::ENEMY));
        let result = stage.spawn_enemy("crab", Box::new(body), Facing::Left);
        assert!(matches!(result, Err(GameError::MissingPlayer)));
        assert!(matches!(stage.tick(PlayerInput::idle(), 0.016), Err(GameError::MissingPlayer)));
    }

    #[test]
    fn test_unknown_enemy_kind() {
        let (world, mut stage) = stage();
        let player = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        stage.spawn_player(Box::new(player)).unwrap();

        let body = world.spawn_body(BodyDesc::new(Vec2::new(3.0, 0.5)).with_layer(CollisionLayer::ENEMY));
        let result = stage.spawn_enemy("octopus", Box::new(body), Facing::Left);
        assert!(matches!(result, Err(GameError::UnknownEnemy(kind)) if kind == "octopus"));
        assert!(stage.enemies().is_empty());
    }

    #[test]
    fn test_contact_hit_routed_to_player() {
        let (world, mut stage) = stage();
        let player = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        let player_id = stage.spawn_player(Box::new(player)).unwrap();
        let body = world.spawn_body(BodyDesc::new(Vec2::new(0.9, 0.5)).with_layer(CollisionLayer::ENEMY));
        stage.spawn_enemy("crab", Box::new(body), Facing::Left).unwrap();

        let landed = stage.tick(PlayerInput::idle(), 0.016).unwrap();
        assert_eq!(
            landed,
            vec![Landed {
                target: player_id,
                result: DamageResult::HealthHit { health: 1 },
            }]
        );
        assert_eq!(stage.player().map(Player::health), Some(1));
    }
}
