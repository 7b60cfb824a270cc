//! Enemies: perception-driven pursuit and attack

use crate::combatant::{Combatant, DamageOrigin};
use crate::config::EnemyConfig;
use crate::contacts::ContactTracker;
use crate::error::{GameError, Result};
use crate::services::Services;
use carapace_ai::{Perception, SightTarget, State, StateMachine};
use carapace_combat::{ActorStats, Damage, DamageResult, Hit};
use carapace_inventory::ShellStats;
use carapace_math::{Facing, Vec2};
use carapace_physics::{Body, BodyId, CollisionLayer, LayerMask, MotionConfig, MotionController};

/// High-level enemy mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Idle,
    Chase,
    Attack,
    Fall,
    Dead,
}

impl State<EnemyCore> for EnemyState {
    fn on_enter(&self, core: &mut EnemyCore) {
        let id = core.id();
        match self {
            Self::Idle => {
                core.combatant.motion_mut().stop();
                core.services.presentation.on_move(id, false);
            }
            Self::Chase => core.services.presentation.on_move(id, true),
            Self::Attack => {
                core.combatant.motion_mut().stop();
                core.face_player();
                core.can_attack = true;
            }
            Self::Fall => core.services.presentation.on_move(id, false),
            Self::Dead => core.die(),
        }
    }

    fn on_exit(&self, core: &mut EnemyCore) {
        match self {
            Self::Attack => core.can_attack = false,
            Self::Fall => core.services.presentation.on_move(core.id(), true),
            _ => {}
        }
    }

    fn tick(&self, core: &mut EnemyCore, _delta_time: f32) -> Option<Self> {
        if *self == Self::Dead {
            return None;
        }
        let grounded = core.combatant.motion().grounded();
        match self {
            Self::Fall => grounded.then_some(Self::Idle),
            _ if !grounded => Some(Self::Fall),
            Self::Idle => core.perception.is_aggro().then_some(Self::Chase),
            Self::Chase => {
                if !core.perception.is_aggro() {
                    Some(Self::Idle)
                } else if core.in_attack_range() && core.combatant.attack().is_some() {
                    Some(Self::Attack)
                } else {
                    core.face_player();
                    let axis = core.combatant.motion().facing().sign();
                    core.combatant.motion_mut().walk(axis);
                    None
                }
            }
            Self::Attack => {
                if core.combatant.is_attacking() {
                    None
                } else if !core.perception.is_aggro() {
                    Some(Self::Idle)
                } else if !core.in_attack_range() {
                    Some(Self::Chase)
                } else {
                    core.face_player();
                    None
                }
            }
            Self::Dead => None,
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Everything an enemy owns apart from its state machine
pub struct EnemyCore {
    kind: String,
    config: EnemyConfig,
    services: Services,
    combatant: Combatant,
    perception: Perception,
    player: BodyId,
    player_position: Option<Vec2>,
    /// Set while the Attack state allows dispatch
    can_attack: bool,
    drop_shell: Option<ShellStats>,
    player_contact: ContactTracker,
}

impl EnemyCore {
    /// Body of the enemy
    pub fn id(&self) -> BodyId {
        self.combatant.body_id()
    }

    /// Configured kind name
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Sight state
    pub fn perception(&self) -> &Perception {
        &self.perception
    }

    fn in_attack_range(&self) -> bool {
        self.player_position.is_some_and(|target| {
            self.combatant.motion().position().distance(target) <= self.config.attack_range
        })
    }

    fn face_player(&mut self) {
        if let Some(target) = self.player_position {
            let motion = self.combatant.motion_mut();
            let facing = motion.facing().towards(motion.position(), target);
            motion.face(facing);
        }
    }

    fn look(&mut self, delta_time: f32) {
        let probe = self.services.probe.clone();
        match probe.body_position(self.player) {
            Some(position) => {
                self.player_position = Some(position);
                let target = SightTarget {
                    body: self.player,
                    position,
                    layers: LayerMask::from_layers(&[CollisionLayer::PLAYER, CollisionLayer::INVULNERABLE]),
                };
                let motion = self.combatant.motion();
                self.perception
                    .update(motion.position(), motion.facing(), &target, &*probe, delta_time);
            }
            None => {
                self.player_position = None;
                self.perception.reset();
            }
        }
    }

    /// Body damage dealt when contact with the player starts
    fn contact_hit(&mut self) -> Option<Hit> {
        let touching = self
            .combatant
            .motion()
            .contacts(LayerMask::of(CollisionLayer::PLAYER));
        let entered = self.player_contact.update(touching);
        entered.contains(&self.player).then(|| {
            let damage = Damage::new(
                self.combatant.motion().position(),
                self.config.collision_knockback,
                self.config.collision_damage,
            );
            Hit::new(self.player, damage)
        })
    }

    fn die(&mut self) {
        let id = self.id();
        let position = self.combatant.motion().position();
        log::info!("{} {id:?} died", self.kind);
        self.combatant.motion_mut().stop();
        self.can_attack = false;
        self.services.presentation.on_death(id);
        if let Some(shell) = self.drop_shell.take() {
            self.services.scene.place_shell(shell, position);
        }
        self.services.scene.despawn(id, 0.0);
    }
}

impl std::fmt::Debug for EnemyCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyCore")
            .field("kind", &self.kind)
            .field("combatant", &self.combatant)
            .field("perception", &self.perception)
            .field("player", &self.player)
            .finish_non_exhaustive()
    }
}

/// A hostile actor
#[derive(Debug)]
pub struct Enemy {
    core: EnemyCore,
    fsm: StateMachine<EnemyState>,
}

impl Enemy {
    /// Build an enemy that hunts `player`.
    ///
    /// An enemy cannot exist without its target: a missing player, or one
    /// the collision probe does not know, is [`GameError::MissingPlayer`].
    pub fn new(
        kind: impl Into<String>,
        config: EnemyConfig,
        body: Box<dyn Body>,
        services: Services,
        player: Option<BodyId>,
    ) -> Result<Self> {
        let player = player.ok_or(GameError::MissingPlayer)?;
        if services.probe.body_position(player).is_none() {
            return Err(GameError::MissingPlayer);
        }

        let motion_config = MotionConfig::default()
            .with_walking_speed(config.walking_speed)
            .with_knockback_duration(config.knockback_duration);
        let motion = MotionController::new(body, services.probe.clone(), motion_config);
        let stats = ActorStats::new(config.max_health)
            .with_armor(config.armor)
            .with_speed(Vec2::new(config.walking_speed, 0.0));
        let combatant = Combatant::new(stats, motion, LayerMask::of(CollisionLayer::PLAYER))
            .with_attack(config.attack.clone())
            .with_invulnerability(config.invulnerability);

        let mut core = EnemyCore {
            kind: kind.into(),
            perception: Perception::new(config.vision.clone()),
            config,
            services,
            combatant,
            player,
            player_position: None,
            can_attack: false,
            drop_shell: None,
            player_contact: ContactTracker::new(),
        };
        log::debug!("Spawned {} {:?}", core.kind, core.id());
        let fsm = StateMachine::new(EnemyState::Idle, &mut core);
        Ok(Self { core, fsm })
    }

    /// Shell left behind on death
    pub fn with_drop_shell(mut self, shell: Option<ShellStats>) -> Self {
        self.core.drop_shell = shell;
        self
    }

    /// Turn the enemy before its first tick
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.core.combatant.motion_mut().face(facing);
        self
    }

    /// Body of the enemy
    pub fn body_id(&self) -> BodyId {
        self.core.id()
    }

    /// Configured kind name
    pub fn kind(&self) -> &str {
        &self.core.kind
    }

    /// Current high-level mode
    pub fn state(&self) -> EnemyState {
        *self.fsm.current()
    }

    /// Everything apart from the state machine
    pub fn core(&self) -> &EnemyCore {
        &self.core
    }

    /// Stats, motion and attack
    pub fn combatant(&self) -> &Combatant {
        &self.core.combatant
    }

    /// Motion of the enemy's body
    pub fn motion(&self) -> &MotionController {
        self.core.combatant.motion()
    }

    /// Current vitals
    pub fn stats(&self) -> &ActorStats {
        self.core.combatant.stats()
    }

    /// Current health
    pub fn health(&self) -> i32 {
        self.stats().current_health
    }

    /// Reached the dead state; never ticked again
    pub fn is_dead(&self) -> bool {
        self.fsm.is_in(&EnemyState::Dead)
    }

    /// Whether the player was visible on the last tick
    pub fn sees_player(&self) -> bool {
        self.core.perception.is_visible()
    }

    /// Damage from the player's attacks; knockback is scaled by the
    /// enemy's knockback factor
    pub fn take_damage(&mut self, damage: &Damage) -> Option<DamageResult> {
        let damage = damage.with_knockback_scaled(self.core.config.knockback_factor);
        let result = self.core.combatant.receive(&damage, DamageOrigin::Attack)?;
        let id = self.body_id();
        if result.is_fatal() {
            self.enter(EnemyState::Dead);
        } else {
            self.core.services.presentation.on_hurt(id);
            self.core
                .services
                .presentation
                .emit_particles(id, self.core.config.hurt_particles);
        }
        Some(result)
    }

    /// Advance one frame: perception, state machine, attack dispatch, then
    /// contact damage. Returns the hits this enemy produced.
    pub fn tick(&mut self, delta_time: f32) -> Vec<Hit> {
        if self.is_dead() {
            return Vec::new();
        }
        self.core.combatant.update(delta_time);
        self.core.look(delta_time);

        if let Some(next) = self.fsm.tick(&mut self.core, delta_time) {
            self.enter(next);
        }

        if self.core.can_attack && self.core.combatant.can_attack() {
            match self.core.combatant.start_attack() {
                Ok(kind) => self.core.services.presentation.on_attack_start(self.body_id(), kind),
                Err(err) => log::warn!("{} attack rejected: {err}", self.core.kind),
            }
        }

        let outcome = self.core.combatant.step_attack(delta_time);
        if let Some(spawn) = &outcome.projectile {
            self.core
                .services
                .scene
                .spawn_projectile(self.body_id(), self.core.combatant.hostile(), spawn);
        }
        let mut hits = outcome.hits;
        hits.extend(self.core.contact_hit());
        hits
    }

    fn enter(&mut self, next: EnemyState) {
        if self.fsm.is_in(&next) {
            return;
        }
        log::debug!("{} {:?}: {:?} -> {:?}", self.core.kind, self.body_id(), self.fsm.current(), next);
        if let Err(err) = self.fsm.transition_to(next, &mut self.core) {
            log::warn!("{} transition refused: {err}", self.core.kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{Event, Recorder};
    use carapace_ai::VisionConfig;
    use carapace_gamestate::MemoryStore;
    use carapace_physics::{BodyDesc, SandboxBody, SandboxWorld};
    use std::sync::Arc;

    fn world() -> SandboxWorld {
        let world = SandboxWorld::default();
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        world
    }

    fn services(world: &SandboxWorld, recorder: &Arc<Recorder>) -> Services {
        Services::new(Arc::new(world.clone()), Arc::new(MemoryStore::new()))
            .with_presentation(recorder.clone())
            .with_scene(recorder.clone())
    }

    fn small_body(world: &SandboxWorld, x: f32, layer: CollisionLayer) -> SandboxBody {
        world.spawn_body(
            BodyDesc::new(Vec2::new(x, 0.2))
                .with_half_extents(Vec2::new(0.2, 0.2))
                .with_layer(layer),
        )
    }

    #[test]
    fn test_missing_player_is_fatal() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);

        let result = Enemy::new("crab", EnemyConfig::default(), Box::new(body.clone()), services(&world, &recorder), None);
        assert!(matches!(result, Err(GameError::MissingPlayer)));

        let result = Enemy::new(
            "crab",
            EnemyConfig::default(),
            Box::new(body),
            services(&world, &recorder),
            Some(BodyId(4242)),
        );
        assert!(matches!(result, Err(GameError::MissingPlayer)));
    }

    #[test]
    fn test_detection_range_sees_behind() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, -0.5, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);
        let vision = VisionConfig::default()
            .with_vision_range(5.0)
            .with_field_of_view(90.0)
            .with_detection_range(1.0);

        let mut enemy = Enemy::new(
            "crab",
            EnemyConfig::default().with_vision(vision),
            Box::new(body),
            services(&world, &recorder),
            Some(player.id()),
        )
        .unwrap()
        .with_facing(Facing::Right);

        enemy.tick(0.016);
        assert!(enemy.sees_player());
        assert_eq!(enemy.state(), EnemyState::Chase);
    }

    #[test]
    fn test_out_of_sight_stays_idle() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, -3.0, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);

        let mut enemy = Enemy::new("crab", EnemyConfig::default(), Box::new(body), services(&world, &recorder), Some(player.id()))
            .unwrap()
            .with_facing(Facing::Right);
        enemy.tick(0.016);
        assert!(!enemy.sees_player());
        assert_eq!(enemy.state(), EnemyState::Idle);
    }

    #[test]
    fn test_chase_walks_towards_player() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, -3.0, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);

        let mut enemy = Enemy::new("crab", EnemyConfig::default(), Box::new(body), services(&world, &recorder), Some(player.id()))
            .unwrap()
            .with_facing(Facing::Left);
        enemy.tick(0.016);
        assert_eq!(enemy.state(), EnemyState::Chase);
        enemy.tick(0.016);
        assert_eq!(enemy.motion().facing(), Facing::Left);
        assert!(enemy.motion().velocity().x < 0.0);
    }

    #[test]
    fn test_contact_damage_once_per_contact() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, 0.3, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);

        let mut enemy = Enemy::new("crab", EnemyConfig::default(), Box::new(body), services(&world, &recorder), Some(player.id()))
            .unwrap();
        let hits = enemy.tick(0.016);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, player.id());
        assert_eq!(hits[0].damage.raw_amount(), 1);
        assert_eq!(hits[0].damage.knockback(), 20.0);

        assert!(enemy.tick(0.016).is_empty());
    }

    #[test]
    fn test_death_drops_shell_once() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, -3.0, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);

        let mut enemy = Enemy::new(
            "crab",
            EnemyConfig::default().with_max_health(2).with_invulnerability(0.0),
            Box::new(body),
            services(&world, &recorder),
            Some(player.id()),
        )
        .unwrap()
        .with_drop_shell(Some(ShellStats::new("SpikyShell")));
        let id = enemy.body_id();

        assert_eq!(
            enemy.take_damage(&Damage::new(Vec2::new(-1.0, 0.0), 20.0, 1)),
            Some(DamageResult::HealthHit { health: 1 })
        );
        assert_eq!(recorder.count(|e| matches!(e, Event::Particles { count: 12, .. })), 1);

        assert_eq!(
            enemy.take_damage(&Damage::new(Vec2::new(-1.0, 0.0), 20.0, 1)),
            Some(DamageResult::Killed)
        );
        assert!(enemy.is_dead());
        assert_eq!(enemy.take_damage(&Damage::new(Vec2::ZERO, 20.0, 1)), None);
        assert!(enemy.tick(0.016).is_empty());

        assert_eq!(recorder.count(|e| matches!(e, Event::ShellPlaced { .. })), 1);
        assert_eq!(recorder.count(|e| matches!(e, Event::Death(_))), 1);
        assert!(recorder.contains(&Event::Despawn { body: id, delay: 0.0 }));
    }

    #[test]
    fn test_knockback_factor_scales_launch() {
        let world = world();
        let recorder = Arc::new(Recorder::new());
        let player = small_body(&world, -3.0, CollisionLayer::PLAYER);
        let body = small_body(&world, 0.0, CollisionLayer::ENEMY);
        let mut config = EnemyConfig::default().with_max_health(5);
        config.knockback_factor = 0.0;

        let mut enemy = Enemy::new("crab", config, Box::new(body), services(&world, &recorder), Some(player.id())).unwrap();
        enemy.take_damage(&Damage::new(Vec2::new(-1.0, 0.0), 20.0, 1));
        assert_eq!(enemy.health(), 4);
        assert!(!enemy.motion().is_knocked_back());
    }
}
