//! Dash attack

use super::{AttackContext, AttackOutcome, DashConfig};
use crate::damage::{Damage, Hit};
use carapace_physics::{BodyId, MotionController};
use std::collections::HashSet;

/// Forward burst that runs until it covers its distance or meets an obstacle
#[derive(Debug, Clone)]
pub struct DashAttack {
    config: DashConfig,
    running: bool,
    start_x: f32,
    elapsed: f32,
    struck: HashSet<BodyId>,
}

impl DashAttack {
    pub fn new(config: DashConfig) -> Self {
        Self {
            config,
            running: false,
            start_x: 0.0,
            elapsed: 0.0,
            struck: HashSet::new(),
        }
    }

    pub fn config(&self) -> &DashConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Distance covered since the dash started
    pub fn traveled(&self, motion: &MotionController) -> f32 {
        (motion.position().x - self.start_x).abs()
    }

    pub(crate) fn start(&mut self, motion: &MotionController) {
        self.running = true;
        self.start_x = motion.position().x;
        self.elapsed = 0.0;
        self.struck.clear();
    }

    /// Upper bound on dash time; a dash pinned in place ends here
    fn stall_time(&self) -> f32 {
        if self.config.speed > 0.0 {
            2.0 * self.config.distance / self.config.speed
        } else {
            0.0
        }
    }

    pub(crate) fn step(&mut self, ctx: &mut AttackContext<'_>, delta_time: f32, outcome: &mut AttackOutcome) {
        let motion = &mut *ctx.motion;
        let origin = motion.position();
        for target in motion.contacts(ctx.hostile) {
            if self.struck.insert(target) {
                let damage = Damage::new(origin, self.config.knockback, self.config.damage);
                outcome.hits.push(Hit::new(target, damage));
            }
        }

        let keep_going = self.traveled(motion) < self.config.distance
            && self.elapsed < self.stall_time()
            && !motion.touching_obstacle()
            && motion.front_clear();

        if keep_going {
            motion.drive_forward(self.config.speed);
            self.elapsed += delta_time;
        } else {
            motion.halt_horizontal();
            self.running = false;
            outcome.finished = true;
            log::debug!(
                "Dash of {:?} ended after {:.2} units",
                motion.body_id(),
                self.traveled(motion)
            );
        }
    }
}
