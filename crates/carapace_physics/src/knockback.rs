//! Knockback as a resumable timed action

use crate::config::MotionConfig;
use carapace_math::{Facing, Vec2};

/// A knockback in progress.
///
/// Launches the actor away from the damage source, then owns horizontal
/// velocity while it decays linearly to zero over `duration`.
#[derive(Debug, Clone, PartialEq)]
pub struct Knockback {
    launch: Vec2,
    elapsed: f32,
    duration: f32,
}

impl Knockback {
    /// Knockback pushing an actor at `target` away from `source`.
    ///
    /// When source and target share an x coordinate the actor is pushed
    /// backwards relative to `facing`.
    pub fn new(target: Vec2, source: Vec2, magnitude: f32, facing: Facing, config: &MotionConfig) -> Self {
        let dx = target.x - source.x;
        let away = if dx > 0.0 {
            1.0
        } else if dx < 0.0 {
            -1.0
        } else {
            -facing.sign()
        };
        let speed = magnitude * config.knockback_scale;
        Self {
            launch: Vec2::new(away * speed, speed.abs() * config.knockback_lift),
            elapsed: 0.0,
            duration: config.knockback_duration.max(f32::EPSILON),
        }
    }

    /// Velocity given to the actor when the knockback starts
    pub fn launch(&self) -> Vec2 {
        self.launch
    }

    /// Advance by `dt`; returns the horizontal velocity to hold this tick
    pub fn update(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.launch.x * (1.0 - self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }
}
