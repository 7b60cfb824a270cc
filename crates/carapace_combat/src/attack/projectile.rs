//! Projectile attack

use super::{AttackContext, AttackOutcome, ProjectileConfig};
use crate::damage::Damage;
use carapace_math::{Facing, Vec2};

/// Request to put a projectile into the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    /// Damage delivered on impact, sourced at the spawn point
    pub damage: Damage,
}

/// Spawn-and-launch attack that completes in one step
#[derive(Debug, Clone)]
pub struct ProjectileAttack {
    config: ProjectileConfig,
    running: bool,
}

impl ProjectileAttack {
    pub fn new(config: ProjectileConfig) -> Self {
        Self {
            config,
            running: false,
        }
    }

    pub fn config(&self) -> &ProjectileConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn start(&mut self) {
        self.running = true;
    }

    pub(crate) fn step(&mut self, ctx: &mut AttackContext<'_>, outcome: &mut AttackOutcome) {
        let facing = ctx.motion.facing();
        let position = ctx.motion.position() + facing.forward() * self.config.offset;
        outcome.projectile = Some(ProjectileSpawn {
            position,
            velocity: facing.forward() * self.config.speed,
            facing,
            damage: Damage::new(position, self.config.knockback, self.config.damage),
        });
        self.running = false;
        outcome.finished = true;
    }
}
