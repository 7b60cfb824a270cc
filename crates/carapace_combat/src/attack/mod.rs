//! Attack commands.
//!
//! An [`AttackCommand`] wraps one attack variant with a running flag, an
//! input-lock flag and a cooldown. It is started once, then stepped every
//! tick; it ends only through its own exit condition. Hits are returned to
//! the caller instead of being applied, so the owner routes them to the
//! targets' damage entry point.

mod config;
mod dash;
mod melee;
mod projectile;

pub use config::{AttackConfig, DashConfig, MeleeConfig, ProjectileConfig};
pub use dash::DashAttack;
pub use melee::MeleeAttack;
pub use projectile::{ProjectileAttack, ProjectileSpawn};

use crate::damage::Hit;
use crate::error::{AttackError, Result};
use crate::stats::AttackKind;
use carapace_physics::{LayerMask, MotionController};

/// What an attack needs from its owner during a step
pub struct AttackContext<'a> {
    pub motion: &'a mut MotionController,
    /// Layers the attack may damage
    pub hostile: LayerMask,
}

impl<'a> AttackContext<'a> {
    pub fn new(motion: &'a mut MotionController, hostile: LayerMask) -> Self {
        Self { motion, hostile }
    }
}

/// Effects produced by one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttackOutcome {
    pub hits: Vec<Hit>,
    pub projectile: Option<ProjectileSpawn>,
    /// The attack completed during this step
    pub finished: bool,
}

impl AttackOutcome {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty() && self.projectile.is_none() && !self.finished
    }
}

/// Closed set of attack variants
#[derive(Debug, Clone)]
pub enum AttackVariant {
    Melee(MeleeAttack),
    Dash(DashAttack),
    Projectile(ProjectileAttack),
}

/// A single actor's attack
#[derive(Debug, Clone)]
pub struct AttackCommand {
    variant: AttackVariant,
    cooldown: f32,
    cooldown_remaining: f32,
}

impl AttackCommand {
    pub fn new(config: AttackConfig) -> Self {
        let cooldown = config.cooldown().max(0.0);
        let variant = match config {
            AttackConfig::Melee(c) => AttackVariant::Melee(MeleeAttack::new(c)),
            AttackConfig::Dash(c) => AttackVariant::Dash(DashAttack::new(c)),
            AttackConfig::Projectile(c) => AttackVariant::Projectile(ProjectileAttack::new(c)),
        };
        Self {
            variant,
            cooldown,
            cooldown_remaining: 0.0,
        }
    }

    pub fn variant(&self) -> &AttackVariant {
        &self.variant
    }

    pub fn kind(&self) -> AttackKind {
        match self.variant {
            AttackVariant::Melee(_) => AttackKind::Melee,
            AttackVariant::Dash(_) => AttackKind::Dash,
            AttackVariant::Projectile(_) => AttackKind::Projectile,
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.variant {
            AttackVariant::Melee(a) => a.is_running(),
            AttackVariant::Dash(a) => a.is_running(),
            AttackVariant::Projectile(a) => a.is_running(),
        }
    }

    /// Whether the owner must ignore movement input. Only a running dash locks.
    pub fn locks_input(&self) -> bool {
        matches!(&self.variant, AttackVariant::Dash(a) if a.is_running())
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Not running and not cooling down
    pub fn is_ready(&self) -> bool {
        !self.is_running() && self.cooldown_remaining <= 0.0
    }

    /// Whether a running attack shields its owner from damage.
    ///
    /// A dash is always immune. A swing is immune unless a hostile is
    /// touching the owner.
    pub fn damage_immune(&self, touching_hostile: bool) -> bool {
        match &self.variant {
            AttackVariant::Dash(a) => a.is_running(),
            AttackVariant::Melee(a) => a.is_running() && !touching_hostile,
            AttackVariant::Projectile(_) => false,
        }
    }

    /// Begin the attack. Fails without side effects while running or cooling down.
    pub fn start(&mut self, motion: &MotionController) -> Result<()> {
        if self.is_running() {
            return Err(AttackError::AlreadyRunning);
        }
        if self.cooldown_remaining > 0.0 {
            return Err(AttackError::CoolingDown {
                remaining: self.cooldown_remaining,
            });
        }

        match &mut self.variant {
            AttackVariant::Melee(a) => a.start(),
            AttackVariant::Dash(a) => a.start(motion),
            AttackVariant::Projectile(a) => a.start(),
        }
        self.cooldown_remaining = self.cooldown;
        log::debug!("{:?} attack started by {:?}", self.kind(), motion.body_id());
        Ok(())
    }

    /// Advance the cooldown and, while running, the attack itself
    pub fn step(&mut self, ctx: &mut AttackContext<'_>, delta_time: f32) -> AttackOutcome {
        self.cooldown_remaining = (self.cooldown_remaining - delta_time).max(0.0);

        let mut outcome = AttackOutcome::default();
        if !self.is_running() {
            return outcome;
        }
        match &mut self.variant {
            AttackVariant::Melee(a) => a.step(ctx, delta_time, &mut outcome),
            AttackVariant::Dash(a) => a.step(ctx, delta_time, &mut outcome),
            AttackVariant::Projectile(a) => a.step(ctx, &mut outcome),
        }
        outcome
    }
}

impl From<AttackConfig> for AttackCommand {
    fn from(config: AttackConfig) -> Self {
        Self::new(config)
    }
}
