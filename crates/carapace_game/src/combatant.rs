//! Health, armor, attack and motion shared by every damageable actor

use carapace_combat::{
    ActorStats, AttackCommand, AttackConfig, AttackContext, AttackError, AttackKind, AttackOutcome, Damage,
    DamageResult, Invulnerability,
};
use carapace_physics::{BodyId, LayerMask, MotionController};

/// Where incoming damage comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOrigin {
    /// Another actor's attack, body or projectile
    Attack,
    /// Level geometry such as spikes; attack immunity does not apply
    Hazard,
}

/// The damage-resolution site of an actor.
///
/// Owns the actor's stats, motion, attack command and invulnerability
/// window. [`receive`](Self::receive) is the only way damage lands.
#[derive(Debug)]
pub struct Combatant {
    stats: ActorStats,
    motion: MotionController,
    attack: Option<AttackCommand>,
    /// Attack to install once the running one ends
    pending_attack: Option<Option<AttackConfig>>,
    invulnerability: Invulnerability,
    hostile: LayerMask,
}

impl Combatant {
    /// Unarmed, with a one second invulnerability window
    pub fn new(stats: ActorStats, motion: MotionController, hostile: LayerMask) -> Self {
        Self {
            stats,
            motion,
            attack: None,
            pending_attack: None,
            invulnerability: Invulnerability::new(1.0),
            hostile,
        }
    }

    /// Equip an attack
    pub fn with_attack(mut self, attack: Option<AttackConfig>) -> Self {
        self.set_attack(attack);
        self
    }

    /// Length of the window opened by a non-fatal hit
    pub fn with_invulnerability(mut self, seconds: f32) -> Self {
        self.invulnerability = Invulnerability::new(seconds);
        self
    }

    /// Body of the actor
    pub fn body_id(&self) -> BodyId {
        self.motion.body_id()
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut ActorStats {
        &mut self.stats
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn motion_mut(&mut self) -> &mut MotionController {
        &mut self.motion
    }

    /// Equipped attack command
    pub fn attack(&self) -> Option<&AttackCommand> {
        self.attack.as_ref()
    }

    /// Replace the attack command.
    ///
    /// A running attack is never cut short: the replacement waits until it
    /// ends through its own exit in [`step_attack`](Self::step_attack).
    pub fn set_attack(&mut self, attack: Option<AttackConfig>) {
        if self.is_attacking() {
            log::debug!("{:?} attack swap waits for the running attack", self.body_id());
            self.pending_attack = Some(attack);
            return;
        }
        self.install_attack(attack);
    }

    fn install_attack(&mut self, attack: Option<AttackConfig>) {
        self.pending_attack = None;
        self.attack = attack.map(AttackCommand::new);
        self.stats.attack_kind = self.attack.as_ref().map(AttackCommand::kind).unwrap_or_default();
        self.motion.set_input_locked(false);
    }

    /// Whether an attack swap is waiting for the running attack to end
    pub fn has_pending_attack(&self) -> bool {
        self.pending_attack.is_some()
    }

    /// Kind of the equipped attack
    pub fn attack_kind(&self) -> AttackKind {
        self.stats.attack_kind
    }

    /// The equipped attack is running
    pub fn is_attacking(&self) -> bool {
        self.attack.as_ref().is_some_and(AttackCommand::is_running)
    }

    /// An attack is equipped, idle and off cooldown
    pub fn can_attack(&self) -> bool {
        self.attack.as_ref().is_some_and(AttackCommand::is_ready)
    }

    /// Layers this actor's attacks damage
    pub fn hostile(&self) -> LayerMask {
        self.hostile
    }

    /// Inside the window that follows a hit
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability.is_active()
    }

    /// Health ran out
    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }

    /// Whether the running attack shields the actor right now
    pub fn is_attack_immune(&self) -> bool {
        self.attack
            .as_ref()
            .is_some_and(|a| a.damage_immune(self.motion.is_touching(self.hostile)))
    }

    /// Apply one instance of damage.
    ///
    /// Returns `None` when the damage was rejected: the actor is already
    /// dead, invulnerable, or shielded by its running attack. A non-fatal
    /// hit opens an invulnerability window and, when the damage carries
    /// knockback, starts exactly one knockback.
    pub fn receive(&mut self, damage: &Damage, origin: DamageOrigin) -> Option<DamageResult> {
        if self.stats.is_dead() || self.invulnerability.is_active() {
            return None;
        }
        if origin == DamageOrigin::Attack && self.is_attack_immune() {
            log::debug!("{:?} shrugs off a hit during its attack", self.body_id());
            return None;
        }

        let result = self.stats.absorb(damage.amount());
        if !result.is_fatal() {
            self.invulnerability.start();
            if damage.has_knockback() {
                self.motion.knockback(damage.source(), damage.knockback());
            }
        }
        log::debug!("{:?} took {} damage: {:?}", self.body_id(), damage.raw_amount(), result);
        Some(result)
    }

    /// Dispatch the equipped attack
    pub fn start_attack(&mut self) -> Result<AttackKind, AttackError> {
        let attack = self.attack.as_mut().ok_or(AttackError::Unarmed)?;
        attack.start(&self.motion)?;
        self.motion.set_input_locked(attack.locks_input());
        Ok(attack.kind())
    }

    /// Step the attack and mirror its input lock onto motion. A pending
    /// attack is installed once the running one has ended.
    pub fn step_attack(&mut self, delta_time: f32) -> AttackOutcome {
        let Some(attack) = self.attack.as_mut() else {
            return AttackOutcome::default();
        };
        let outcome = attack.step(&mut AttackContext::new(&mut self.motion, self.hostile), delta_time);
        let running = attack.is_running();
        self.motion.set_input_locked(attack.locks_input());

        if !running {
            if let Some(next) = self.pending_attack.take() {
                self.install_attack(next);
            }
        }
        outcome
    }

    /// Advance knockback and invulnerability; returns `true` when the
    /// invulnerability window closed during this call
    pub fn update(&mut self, delta_time: f32) -> bool {
        self.motion.update(delta_time);
        self.invulnerability.update(delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carapace_combat::{DashConfig, MeleeConfig};
    use carapace_math::Vec2;
    use carapace_physics::{BodyDesc, CollisionLayer, MotionConfig, SandboxWorld};
    use std::sync::Arc;

    fn combatant(world: &SandboxWorld, health: i32) -> Combatant {
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        let body = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        let motion = MotionController::new(Box::new(body), Arc::new(world.clone()), MotionConfig::default());
        Combatant::new(ActorStats::new(health), motion, LayerMask::of(CollisionLayer::ENEMY))
    }

    #[test]
    fn test_health_hit_opens_window_and_knocks_back_once() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 2);
        let id = actor.body_id();

        let result = actor.receive(&Damage::new(Vec2::ZERO, 20.0, 1), DamageOrigin::Attack);
        assert_eq!(result, Some(DamageResult::HealthHit { health: 1 }));
        assert_eq!(actor.stats().current_health, 1);
        assert!(actor.is_invulnerable());
        assert!(actor.motion().is_knocked_back());
        assert_eq!(world.impulse_count(id), 1);

        // Second hit inside the window changes nothing
        assert_eq!(actor.receive(&Damage::new(Vec2::ZERO, 20.0, 1), DamageOrigin::Attack), None);
        assert_eq!(actor.stats().current_health, 1);
        assert_eq!(world.impulse_count(id), 1);
    }

    #[test]
    fn test_zero_knockback_skips_knockback() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3);

        actor.receive(&Damage::new(Vec2::ZERO, 0.0, 1), DamageOrigin::Hazard);
        assert!(!actor.motion().is_knocked_back());
        assert_eq!(world.impulse_count(actor.body_id()), 0);
    }

    #[test]
    fn test_fatal_hit_has_no_window_and_dead_rejects() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 1);

        assert_eq!(
            actor.receive(&Damage::new(Vec2::ZERO, 20.0, 3), DamageOrigin::Attack),
            Some(DamageResult::Killed)
        );
        assert!(actor.is_dead());
        assert!(!actor.is_invulnerable());
        assert_eq!(actor.receive(&Damage::new(Vec2::ZERO, 20.0, 1), DamageOrigin::Attack), None);
    }

    #[test]
    fn test_dash_immune_but_not_to_hazards() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3).with_attack(Some(AttackConfig::Dash(DashConfig::default())));

        assert_eq!(actor.start_attack(), Ok(AttackKind::Dash));
        assert!(actor.motion().is_input_locked());
        assert_eq!(actor.receive(&Damage::new(Vec2::ZERO, 20.0, 1), DamageOrigin::Attack), None);
        assert_eq!(
            actor.receive(&Damage::new(Vec2::ZERO, 0.0, 1), DamageOrigin::Hazard),
            Some(DamageResult::HealthHit { health: 2 })
        );
    }

    #[test]
    fn test_second_dispatch_rejected() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3).with_attack(Some(AttackConfig::Melee(MeleeConfig::default())));

        assert_eq!(actor.start_attack(), Ok(AttackKind::Melee));
        assert_eq!(actor.start_attack(), Err(AttackError::AlreadyRunning));
        assert!(actor.is_attacking());
        assert!(!actor.motion().is_input_locked());
    }

    #[test]
    fn test_unarmed() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3);
        assert_eq!(actor.start_attack(), Err(AttackError::Unarmed));
        assert!(!actor.can_attack());
        assert!(actor.step_attack(0.1).is_empty());
    }

    #[test]
    fn test_attack_swap_waits_for_running_dash() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3).with_attack(Some(AttackConfig::Dash(DashConfig::default())));
        actor.start_attack().unwrap();
        actor.step_attack(1.0 / 60.0);
        world.step(1.0 / 60.0);

        actor.set_attack(Some(AttackConfig::Melee(MeleeConfig::default())));
        assert!(actor.has_pending_attack());
        assert!(actor.is_attacking());
        assert_eq!(actor.attack_kind(), AttackKind::Dash);
        assert!(actor.motion().is_input_locked());

        let mut ticks = 0;
        while actor.is_attacking() && ticks < 600 {
            actor.step_attack(1.0 / 60.0);
            world.step(1.0 / 60.0);
            ticks += 1;
        }
        assert!(!actor.has_pending_attack());
        assert_eq!(actor.attack_kind(), AttackKind::Melee);
        assert!(!actor.motion().is_input_locked());
        assert_eq!(actor.motion().velocity().x, 0.0);
        assert!(actor.motion().position().x >= 4.0);
    }

    #[test]
    fn test_idle_attack_swaps_at_once() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3).with_attack(Some(AttackConfig::Dash(DashConfig::default())));
        actor.set_attack(None);
        assert!(!actor.has_pending_attack());
        assert_eq!(actor.start_attack(), Err(AttackError::Unarmed));
    }

    #[test]
    fn test_window_closes() {
        let world = SandboxWorld::default();
        let mut actor = combatant(&world, 3).with_invulnerability(0.5);
        actor.receive(&Damage::new(Vec2::ZERO, 0.0, 1), DamageOrigin::Attack);

        assert!(!actor.update(0.25));
        assert!(actor.update(0.3));
        assert!(!actor.is_invulnerable());
    }
}
