//! The player character.
//!
//! [`Player`] composes a [`Combatant`] with a shell slot, coins, hiding and
//! level-completion state, and drives its high-level mode through a
//! [`StateMachine`] of [`PlayerState`]s. One [`PlayerInput`] snapshot is
//! consumed per tick; device binding lives elsewhere.

use crate::combatant::{Combatant, DamageOrigin};
use crate::config::{GameConfig, PlayerConfig};
use crate::contacts::ContactTracker;
use crate::error::{GameError, Result};
use crate::services::{ShellVisual, Sound, Services};
use carapace_ai::{State, StateMachine};
use carapace_combat::{ActorStats, AttackKind, Damage, DamageResult, Hit};
use carapace_gamestate::{keys, redeem_amount, PlayerProgress, NO_SHELL};
use carapace_inventory::{ShellCatalog, ShellSlot, ShellStats};
use carapace_physics::{Body, BodyId, CollisionLayer, LayerMask, MotionConfig, MotionController};
use std::sync::Arc;

/// One tick of player intent
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// -1 (left) to 1 (right)
    pub horizontal: f32,
    pub jump_pressed: bool,
    pub jump_released: bool,
    pub hide_pressed: bool,
    pub hide_released: bool,
    pub attack_pressed: bool,
    pub pick_up_pressed: bool,
    pub pick_up_held: bool,
}

impl PlayerInput {
    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Horizontal movement only
    pub fn walk(axis: f32) -> Self {
        Self {
            horizontal: axis,
            ..Self::default()
        }
    }

    /// Press jump
    pub fn with_jump(mut self) -> Self {
        self.jump_pressed = true;
        self
    }

    /// Release jump early
    pub fn with_jump_release(mut self) -> Self {
        self.jump_released = true;
        self
    }

    /// Press hide
    pub fn with_hide(mut self) -> Self {
        self.hide_pressed = true;
        self
    }

    /// Release hide
    pub fn with_hide_release(mut self) -> Self {
        self.hide_released = true;
        self
    }

    /// Press attack
    pub fn with_attack(mut self) -> Self {
        self.attack_pressed = true;
        self
    }

    /// Press pick-up; counts as held too
    pub fn with_pick_up(mut self) -> Self {
        self.pick_up_pressed = true;
        self.pick_up_held = true;
        self
    }
}

/// High-level player mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Move,
    Attack,
    Hurt,
    Hide,
    Fall,
    Dead,
}

impl State<PlayerCore> for PlayerState {
    fn on_enter(&self, core: &mut PlayerCore) {
        match self {
            Self::Idle => {
                core.combatant.motion_mut().stop();
                core.services.presentation.on_move(core.id(), false);
            }
            Self::Move => core.services.presentation.on_move(core.id(), true),
            Self::Hide => core.crouch(),
            Self::Dead => core.die(),
            Self::Attack | Self::Hurt | Self::Fall => {}
        }
    }

    fn on_exit(&self, core: &mut PlayerCore) {
        if *self == Self::Hide {
            core.stand_up();
        }
    }

    fn tick(&self, core: &mut PlayerCore, _delta_time: f32) -> Option<Self> {
        match self {
            Self::Dead => None,
            Self::Hide => core.can_stand_up().then(|| core.resting_state()),
            _ => {
                let next = core.resting_state();
                (next != *self).then_some(next)
            }
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self, Self::Dead)
    }
}

/// Everything the player owns apart from its state machine
pub struct PlayerCore {
    config: PlayerConfig,
    base_shell: ShellStats,
    catalog: Arc<ShellCatalog>,
    services: Services,
    combatant: Combatant,
    slot: ShellSlot,
    /// Stats source in effect: the worn shell or the base shell
    profile: ShellStats,
    coins: i32,
    input: PlayerInput,
    grounded: bool,
    hiding: bool,
    hide_held: bool,
    hide_time: f32,
    at_finish: bool,
    in_finish_zone: bool,
    level_complete: bool,
    input_enabled: bool,
    triggers: ContactTracker,
}

impl PlayerCore {
    /// Body of the player
    pub fn id(&self) -> BodyId {
        self.combatant.body_id()
    }

    /// Stats, motion and attack
    pub fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    /// Stats source in effect
    pub fn profile(&self) -> &ShellStats {
        &self.profile
    }

    /// Mode the player settles into when nothing holds it elsewhere
    fn resting_state(&self) -> PlayerState {
        if self.combatant.motion().is_knocked_back() {
            PlayerState::Hurt
        } else if self.combatant.is_attacking() {
            PlayerState::Attack
        } else if !self.grounded {
            PlayerState::Fall
        } else if self.input.horizontal != 0.0 {
            PlayerState::Move
        } else {
            PlayerState::Idle
        }
    }

    fn can_stand_up(&self) -> bool {
        !self.hide_held && self.grounded && !self.combatant.motion().near_ceiling()
    }

    fn crouch(&mut self) {
        self.hiding = true;
        self.hide_time = 0.0;
        let speed = self.profile.speed.x * self.config.hide_speed_factor;
        let motion = self.combatant.motion_mut();
        motion.set_walking_speed(speed);
        motion.stop();
        motion.set_crouched(true);
        self.services.presentation.on_hide(self.id(), true);
        self.services.audio.play_sound(Sound::Hide);
    }

    fn stand_up(&mut self) {
        self.hiding = false;
        self.hide_held = false;
        let speed = self.profile.speed.x;
        let motion = self.combatant.motion_mut();
        motion.set_walking_speed(speed);
        motion.set_crouched(false);
        self.services.presentation.on_hide(self.id(), false);
    }

    fn die(&mut self) {
        let id = self.id();
        log::info!("Player {id:?} died");
        self.services.audio.play_sound(Sound::Die);
        let motion = self.combatant.motion_mut();
        motion.set_layer(CollisionLayer::INVULNERABLE);
        motion.stop();
        self.services.presentation.on_death(id);
        self.input_enabled = false;

        let persistence = &self.services.persistence;
        persistence.set_string(keys::SHELL, self.slot.name().unwrap_or(NO_SHELL));
        persistence.set_int(keys::ARMOR, 0);

        self.services.scene.player_died();
        self.services.scene.despawn(id, self.config.teardown_delay);
    }

    /// Switch the stats source to `shell`
    fn apply_profile(&mut self, shell: &ShellStats) {
        let hiding_factor = if self.hiding { self.config.hide_speed_factor } else { 1.0 };
        let stats = self.combatant.stats_mut();
        stats.armor = shell.armor.max(0);
        stats.speed = shell.speed;
        self.combatant
            .motion_mut()
            .set_walking_speed(shell.speed.x * hiding_factor);
        self.combatant.set_attack(shell.attack.clone());
        self.profile = shell.clone();
        self.refresh_hud();
    }

    fn refresh_hud(&self) {
        let stats = self.combatant.stats();
        self.services.hud.update_health(stats.display_health());
        self.services.hud.update_armor(stats.display_armor());
    }

    fn shell_visual(&self) -> ShellVisual {
        match (self.slot.is_empty(), self.combatant.stats().armor) {
            (true, _) => ShellVisual::None,
            (false, 1) => ShellVisual::Cracked,
            (false, _) => ShellVisual::Intact,
        }
    }

    /// Wear `shell`; the slot must already be empty
    fn equip(&mut self, shell: ShellStats) {
        self.apply_profile(&shell);
        self.slot.equip(shell, 0);
        self.services.presentation.set_shell_visual(self.id(), self.shell_visual());
    }

    /// Leave the worn shell in the world with whatever armor it has left
    fn drop_shell(&mut self) {
        let armor = self.combatant.stats().armor;
        if let Some(shell) = self.slot.drop_shell(armor) {
            log::debug!("Dropped shell {} with {} armor", shell.name, shell.armor);
            self.services.scene.place_shell(shell, self.combatant.motion().position());
        }
    }

    fn break_shell(&mut self) {
        if let Some(shell) = self.slot.break_shell() {
            log::info!("Shell {} broke", shell.name);
        }
        self.services.presentation.set_shell_visual(self.id(), ShellVisual::None);
        let base = self.base_shell.clone();
        self.apply_profile(&base);
    }

    fn collect_coin(&mut self, coin: BodyId) {
        self.services.scene.despawn(coin, 0.0);
        self.coins += 1;
        self.redeem_coins();
        self.services.hud.update_coins(self.coins.max(0));
        self.services.audio.play_sound(Sound::Coin);
    }

    fn redeem_coins(&mut self) {
        let persistence = self.services.persistence.clone();
        if self.coins < redeem_amount(&*persistence, self.config.default_redeem_amount) {
            return;
        }

        if self.slot.is_empty() {
            if let Some(shell) = self.catalog.redeem_shell() {
                log::info!("Coins redeemed for shell {}", shell.name);
                self.equip(shell);
                self.coins = 0;
                self.services.audio.play_sound(Sound::ShellRedeem);
                return;
            }
        }

        let saved_health = persistence.get_int(keys::HEALTH, self.config.default_health);
        let stats = self.combatant.stats_mut();
        if stats.current_health < saved_health {
            stats.heal(1);
            log::info!("Coins redeemed for health");
        } else {
            stats.add_armor(1);
            log::info!("Coins redeemed for armor");
            if stats.armor == 2 && !self.slot.is_empty() {
                self.services.presentation.set_shell_visual(self.id(), ShellVisual::Intact);
            }
        }
        self.coins = 0;
        self.refresh_hud();
        self.services.audio.play_sound(Sound::HpIncrease);
    }

    fn progress(&self) -> PlayerProgress {
        let stats = self.combatant.stats();
        PlayerProgress {
            shell: self.slot.name().unwrap_or(NO_SHELL).to_string(),
            health: stats.current_health,
            armor: stats.armor,
            coins: self.coins,
        }
    }
}

impl std::fmt::Debug for PlayerCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerCore")
            .field("combatant", &self.combatant)
            .field("shell", &self.slot.name())
            .field("coins", &self.coins)
            .field("hiding", &self.hiding)
            .field("level_complete", &self.level_complete)
            .finish_non_exhaustive()
    }
}

/// The player character
#[derive(Debug)]
pub struct Player {
    core: PlayerCore,
    fsm: StateMachine<PlayerState>,
}

impl Player {
    /// Build the player around `body`, restoring saved progress.
    ///
    /// Fails with [`GameError::MissingPlayer`] when the collision probe does
    /// not know the body.
    pub fn spawn(
        config: &GameConfig,
        catalog: Arc<ShellCatalog>,
        body: Box<dyn Body>,
        services: Services,
    ) -> Result<Self> {
        let id = body.id();
        if services.probe.body_position(id).is_none() {
            return Err(GameError::MissingPlayer);
        }

        let player = config.player.clone();
        let progress = PlayerProgress::load(&*services.persistence, player.default_health);
        let motion_config = MotionConfig::default()
            .with_walking_speed(config.base_shell.speed.x)
            .with_knockback_duration(player.knockback_duration);
        let motion = MotionController::new(body, services.probe.clone(), motion_config);
        let stats = ActorStats::new(player.max_health).with_current_health(progress.health);
        let combatant = Combatant::new(stats, motion, LayerMask::of(CollisionLayer::ENEMY))
            .with_invulnerability(player.invulnerability);

        let mut core = PlayerCore {
            config: player,
            base_shell: config.base_shell.clone(),
            profile: config.base_shell.clone(),
            catalog,
            services,
            combatant,
            slot: ShellSlot::new(),
            coins: progress.coins,
            input: PlayerInput::default(),
            grounded: false,
            hiding: false,
            hide_held: false,
            hide_time: 0.0,
            at_finish: false,
            in_finish_zone: false,
            level_complete: false,
            input_enabled: true,
            triggers: ContactTracker::new(),
        };

        match core.catalog.spawn(&progress.shell) {
            Some(shell) => core.equip(shell),
            None => {
                let base = core.base_shell.clone();
                core.apply_profile(&base);
            }
        }
        core.combatant.stats_mut().armor = progress.armor.max(0);
        if !core.slot.is_empty() {
            core.services.presentation.set_shell_visual(id, core.shell_visual());
        }
        core.services.hud.update_coins(core.coins.max(0));
        core.refresh_hud();

        log::info!(
            "Player {id:?} spawned: shell={} health={} armor={} coins={}",
            progress.shell,
            core.combatant.stats().current_health,
            core.combatant.stats().armor,
            core.coins
        );
        let fsm = StateMachine::new(PlayerState::Idle, &mut core);
        Ok(Self { core, fsm })
    }

    /// Body of the player
    pub fn body_id(&self) -> BodyId {
        self.core.id()
    }

    /// Current high-level mode
    pub fn state(&self) -> PlayerState {
        *self.fsm.current()
    }

    /// Everything apart from the state machine
    pub fn core(&self) -> &PlayerCore {
        &self.core
    }

    /// Stats, motion and attack
    pub fn combatant(&self) -> &Combatant {
        &self.core.combatant
    }

    /// Motion of the player's body
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

    /// Current armor
    pub fn armor(&self) -> i32 {
        self.stats().armor
    }

    /// Coins collected since the last redemption
    pub fn coins(&self) -> i32 {
        self.core.coins
    }

    /// Name of the worn shell, if any
    pub fn shell_name(&self) -> Option<&str> {
        self.core.slot.name()
    }

    /// Attack of the stats source in effect
    pub fn attack_kind(&self) -> AttackKind {
        self.core.combatant.attack_kind()
    }

    /// Crouched inside the shell
    pub fn is_hiding(&self) -> bool {
        self.core.hiding
    }

    /// Inside the window that follows a hit
    pub fn is_invulnerable(&self) -> bool {
        self.core.combatant.is_invulnerable()
    }

    /// Health ran out
    pub fn is_dead(&self) -> bool {
        self.fsm.is_in(&PlayerState::Dead)
    }

    /// The chest was opened
    pub fn is_level_complete(&self) -> bool {
        self.core.level_complete
    }

    /// Damage from another actor
    pub fn take_damage(&mut self, damage: &Damage) -> Option<DamageResult> {
        self.apply_damage(damage, DamageOrigin::Attack)
    }

    /// Advance one frame. Returns the hits the player's attack produced.
    pub fn tick(&mut self, input: PlayerInput, delta_time: f32) -> Vec<Hit> {
        if self.is_dead() {
            return Vec::new();
        }
        self.core.input = if self.core.input_enabled {
            input
        } else {
            PlayerInput::default()
        };

        if self.core.combatant.update(delta_time) {
            self.core
                .combatant
                .motion_mut()
                .set_layer(CollisionLayer::PLAYER);
            self.core.services.presentation.on_invulnerable(self.body_id(), false);
        }
        if self.core.hiding {
            self.core.hide_time += delta_time;
        }
        self.sense();

        self.handle_triggers();
        if self.is_dead() {
            return Vec::new();
        }
        self.handle_input();

        let outcome = self.core.combatant.step_attack(delta_time);
        if let Some(spawn) = &outcome.projectile {
            self.core
                .services
                .scene
                .spawn_projectile(self.body_id(), self.core.combatant.hostile(), spawn);
        }

        if let Some(next) = self.fsm.tick(&mut self.core, delta_time) {
            self.enter(next);
        }
        outcome.hits
    }

    fn enter(&mut self, next: PlayerState) {
        if self.fsm.is_in(&next) {
            return;
        }
        log::debug!("Player {:?} -> {:?}", self.fsm.current(), next);
        if let Err(err) = self.fsm.transition_to(next, &mut self.core) {
            log::warn!("Player transition refused: {err}");
        }
    }

    fn sense(&mut self) {
        let grounded = self.core.combatant.motion().grounded();
        if grounded != self.core.grounded {
            self.core.grounded = grounded;
            self.core.services.presentation.on_grounded(self.body_id(), grounded);
        }
        if grounded {
            let gravity = self.core.config.grounded_gravity;
            self.core.combatant.motion_mut().set_gravity_scale(gravity);
        }
    }

    fn handle_triggers(&mut self) {
        let motion = self.core.combatant.motion();
        let hazards = motion.contacts(LayerMask::of(CollisionLayer::HAZARD));
        let coins = motion.contacts(LayerMask::of(CollisionLayer::COINS));
        let finish = motion.contacts(LayerMask::of(CollisionLayer::FINISH));
        self.core.in_finish_zone = !finish.is_empty();

        let entered = self
            .core
            .triggers
            .update(hazards.iter().chain(&coins).chain(&finish).copied());
        for id in entered {
            if hazards.contains(&id) {
                let damage = Damage::new(
                    self.core.combatant.motion().position(),
                    0.0,
                    self.core.config.hazard_damage,
                );
                self.apply_damage(&damage, DamageOrigin::Hazard);
            } else if coins.contains(&id) {
                self.core.collect_coin(id);
            } else if !self.core.at_finish {
                log::info!("Player reached the finish");
                self.core.at_finish = true;
            }
        }
    }

    fn handle_input(&mut self) {
        let input = self.core.input;
        if input.jump_pressed {
            self.jump();
        }
        if input.jump_released {
            let gravity = self.core.profile.speed.y * self.core.config.jump_release_gravity_factor;
            self.core.combatant.motion_mut().set_gravity_scale(gravity);
        }
        if input.hide_pressed {
            self.hide();
        }
        if input.hide_released {
            self.core.hide_held = false;
        }
        if input.attack_pressed {
            self.attack();
        }
        if self.core.in_finish_zone && (input.pick_up_pressed || input.pick_up_held) {
            self.complete_level();
        } else if input.pick_up_pressed {
            self.swap_shell();
        }
        if input.horizontal != 0.0 {
            self.core.combatant.motion_mut().walk(input.horizontal);
        }
    }

    fn jump(&mut self) {
        if self.core.combatant.motion().is_input_locked() {
            return;
        }
        let mut height = self.core.profile.speed.y;
        if self.core.hiding && self.core.hide_time > self.core.config.hide_charge_time {
            height += self.core.config.hide_jump_bonus;
        }
        if self.core.combatant.motion_mut().jump(height) {
            log::debug!("Player jumps {height}");
            self.core.services.audio.play_sound(Sound::Jump);
            if self.core.hiding {
                self.core.hide_held = false;
                self.enter(PlayerState::Fall);
            }
        }
    }

    fn hide(&mut self) {
        if self.core.hiding || !self.core.grounded || self.core.combatant.motion().is_input_locked() {
            return;
        }
        self.core.hide_held = true;
        self.enter(PlayerState::Hide);
    }

    fn attack(&mut self) {
        if self.core.hiding {
            return;
        }
        if !self.core.combatant.can_attack() {
            log::debug!("Attack input ignored while attack is busy or missing");
            return;
        }
        match self.core.combatant.start_attack() {
            Ok(kind) => {
                let id = self.body_id();
                self.core.services.presentation.on_attack_start(id, kind);
                if kind == AttackKind::Dash {
                    self.core
                        .services
                        .presentation
                        .emit_particles(id, self.core.config.dash_particles);
                }
                self.core.services.audio.play_sound(Sound::Attack);
                self.enter(PlayerState::Attack);
            }
            Err(err) => log::warn!("Attack rejected: {err}"),
        }
    }

    fn swap_shell(&mut self) {
        if self.core.at_finish || self.core.combatant.is_attacking() {
            return;
        }
        let scene = self.core.services.scene.clone();
        let found = self
            .core
            .combatant
            .motion()
            .contacts(LayerMask::of(CollisionLayer::SHELLS))
            .into_iter()
            .find_map(|id| scene.take_shell(id));

        if let Some(shell) = found {
            log::info!("Player picks up {}", shell.name);
            self.core.drop_shell();
            self.core.equip(shell);
        } else if !self.core.profile.is_melee() {
            log::info!("Player drops its shell");
            self.core.drop_shell();
            self.core.services.presentation.set_shell_visual(self.body_id(), ShellVisual::None);
            let base = self.core.base_shell.clone();
            self.core.apply_profile(&base);
        } else {
            return;
        }
        self.core.services.presentation.on_shell_swap(self.body_id());
        self.core.services.audio.play_sound(Sound::Pickup);
    }

    fn complete_level(&mut self) {
        if self.core.level_complete {
            return;
        }
        self.core.services.scene.open_chest();
        self.core.progress().save(&*self.core.services.persistence);
        self.core.input_enabled = false;
        self.core.level_complete = true;
        log::info!("Level complete");
    }

    fn apply_damage(&mut self, damage: &Damage, origin: DamageOrigin) -> Option<DamageResult> {
        let result = self.core.combatant.receive(damage, origin)?;
        let id = self.body_id();
        self.core.services.audio.play_sound(Sound::Hit);

        match result {
            DamageResult::ArmorHit { armor } => {
                self.core.services.hud.update_armor(armor.max(0));
                if armor == 1 {
                    self.core.services.presentation.set_shell_visual(id, ShellVisual::Cracked);
                }
            }
            DamageResult::ShellBroken => {
                self.core.services.hud.update_armor(0);
                self.core.break_shell();
            }
            DamageResult::HealthHit { health } => self.core.services.hud.update_health(health.max(0)),
            DamageResult::Killed => self.core.services.hud.update_health(0),
        }

        if result.is_fatal() {
            self.enter(PlayerState::Dead);
        } else {
            self.core.services.presentation.on_hurt(id);
            if self.core.combatant.is_invulnerable() {
                self.core
                    .combatant
                    .motion_mut()
                    .set_layer(CollisionLayer::INVULNERABLE);
                self.core.services.presentation.on_invulnerable(id, true);
            }
            if !self.core.hiding && self.core.combatant.motion().is_knocked_back() {
                self.enter(PlayerState::Hurt);
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::{Event, Recorder};
    use carapace_gamestate::{MemoryStore, Persistence};
    use carapace_math::Vec2;
    use carapace_physics::{BodyDesc, SandboxWorld};

    fn setup(store: MemoryStore) -> (SandboxWorld, Arc<Recorder>, Arc<MemoryStore>, Player) {
        let world = SandboxWorld::default();
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        let recorder = Arc::new(Recorder::new());
        let store = Arc::new(store);
        let services = Services::new(Arc::new(world.clone()), store.clone())
            .with_presentation(recorder.clone())
            .with_audio(recorder.clone())
            .with_hud(recorder.clone())
            .with_scene(recorder.clone());
        let body = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        let player = Player::spawn(
            &GameConfig::default(),
            Arc::new(ShellCatalog::new()),
            Box::new(body),
            services,
        )
        .unwrap();
        (world, recorder, store, player)
    }

    #[test]
    fn test_fresh_spawn() {
        let (_world, recorder, _store, player) = setup(MemoryStore::new());
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.health(), 2);
        assert_eq!(player.armor(), 0);
        assert_eq!(player.shell_name(), None);
        assert_eq!(player.attack_kind(), AttackKind::Melee);
        assert_eq!(recorder.hud(), (Some(2), Some(0), Some(0)));
    }

    #[test]
    fn test_walk_then_stop() {
        let (_world, recorder, _store, mut player) = setup(MemoryStore::new());
        player.tick(PlayerInput::walk(1.0), 0.016);
        assert_eq!(player.state(), PlayerState::Move);
        assert!(player.motion().velocity().x > 0.0);

        player.tick(PlayerInput::idle(), 0.016);
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.motion().velocity().x, 0.0);
        assert!(recorder.contains(&Event::Move {
            actor: player.body_id(),
            moving: true
        }));
    }

    #[test]
    fn test_attack_enters_attack_state() {
        let (_world, recorder, _store, mut player) = setup(MemoryStore::new());
        player.tick(PlayerInput::idle().with_attack(), 0.016);
        assert_eq!(player.state(), PlayerState::Attack);
        assert_eq!(recorder.sounds(), vec![Sound::Attack]);

        for _ in 0..30 {
            player.tick(PlayerInput::idle(), 0.016);
        }
        assert_eq!(player.state(), PlayerState::Idle);
    }

    #[test]
    fn test_hide_blocks_attack_and_release_stands_up() {
        let (_world, recorder, _store, mut player) = setup(MemoryStore::new());
        player.tick(PlayerInput::idle(), 0.016);
        player.tick(PlayerInput::idle().with_hide(), 0.016);
        assert_eq!(player.state(), PlayerState::Hide);
        assert!(player.is_hiding());
        assert_eq!(player.motion().walking_speed(), 4.0 * 0.4);

        player.tick(PlayerInput::idle().with_attack(), 0.016);
        assert_eq!(recorder.count(|e| matches!(e, Event::AttackStart { .. })), 0);

        player.tick(PlayerInput::idle().with_hide_release(), 0.016);
        assert!(!player.is_hiding());
        assert_eq!(player.state(), PlayerState::Idle);
        assert_eq!(player.motion().walking_speed(), 4.0);
    }

    #[test]
    fn test_death_persists_and_is_final() {
        let (_world, recorder, store, mut player) = setup(MemoryStore::new().with_int(keys::ARMOR, 0));
        let id = player.body_id();

        assert_eq!(
            player.take_damage(&Damage::new(Vec2::ZERO, 20.0, 5)),
            Some(DamageResult::Killed)
        );
        assert!(player.is_dead());
        assert_eq!(store.get_string(keys::SHELL, ""), NO_SHELL);
        assert!(recorder.contains(&Event::PlayerDied));
        assert!(recorder.contains(&Event::Despawn { body: id, delay: 1.0 }));

        assert_eq!(player.take_damage(&Damage::new(Vec2::ZERO, 20.0, 1)), None);
        assert!(player.tick(PlayerInput::walk(1.0), 0.016).is_empty());
        assert_eq!(recorder.count(|e| matches!(e, Event::Death(_))), 1);
    }
}
