//! Melee swing

use super::{AttackContext, AttackOutcome, MeleeConfig};
use crate::damage::{Damage, Hit};
use carapace_physics::BodyId;
use std::collections::HashSet;

/// A timed swing that damages every hostile in its hit-box at most once
#[derive(Debug, Clone)]
pub struct MeleeAttack {
    config: MeleeConfig,
    running: bool,
    elapsed: f32,
    struck: HashSet<BodyId>,
}

impl MeleeAttack {
    pub fn new(config: MeleeConfig) -> Self {
        Self {
            config,
            running: false,
            elapsed: 0.0,
            struck: HashSet::new(),
        }
    }

    pub fn config(&self) -> &MeleeConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub(crate) fn start(&mut self) {
        self.running = true;
        self.elapsed = 0.0;
        self.struck.clear();
    }

    pub(crate) fn step(&mut self, ctx: &mut AttackContext<'_>, delta_time: f32, outcome: &mut AttackOutcome) {
        self.elapsed += delta_time;

        let origin = ctx.motion.position();
        let center = origin + ctx.motion.facing().forward() * self.config.offset;
        let targets = ctx
            .motion
            .probe()
            .overlap_box(center, self.config.reach, ctx.hostile);
        for target in targets {
            if target != ctx.motion.body_id() && self.struck.insert(target) {
                let damage = Damage::new(origin, self.config.knockback, self.config.damage);
                outcome.hits.push(Hit::new(target, damage));
            }
        }

        if self.elapsed >= self.config.duration {
            self.running = false;
            outcome.finished = true;
        }
    }
}
