//! Motion and sandbox configuration

use crate::error::{PhysicsError, Result};
use crate::layers::{CollisionLayer, LayerMask};
use serde::{Deserialize, Serialize};

/// Tuning for an actor's [`MotionController`](crate::motion::MotionController)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Horizontal speed used by `walk`
    pub walking_speed: f32,

    /// Gravity used to turn a jump height into a launch speed
    pub gravity: f32,

    /// Seconds a knockback owns horizontal velocity
    pub knockback_duration: f32,

    /// Converts a damage knockback magnitude into a launch speed
    pub knockback_scale: f32,

    /// Upward share of a knockback launch
    pub knockback_lift: f32,

    /// Probe length past the body's side for `front_clear`
    pub front_probe_distance: f32,

    /// Probe length past the body's top for `near_ceiling`
    pub ceiling_probe_distance: f32,

    /// Geometry probed by `front_clear` and `near_ceiling`
    pub blocking_mask: LayerMask,

    /// Geometry that ends a dash on contact
    pub obstacle_mask: LayerMask,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            walking_speed: 4.0,
            gravity: 9.81,
            knockback_duration: 0.25,
            knockback_scale: 0.25,
            knockback_lift: 0.5,
            front_probe_distance: 0.1,
            ceiling_probe_distance: 0.5,
            blocking_mask: LayerMask::WALKABLE,
            obstacle_mask: LayerMask::of(CollisionLayer::OBSTACLE),
        }
    }
}

impl MotionConfig {
    pub fn with_walking_speed(mut self, speed: f32) -> Self {
        self.walking_speed = speed;
        self
    }

    pub fn with_knockback_duration(mut self, duration: f32) -> Self {
        self.knockback_duration = duration;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.knockback_duration <= 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "knockback_duration must be positive".into(),
            ));
        }
        if self.gravity < 0.0 || self.walking_speed < 0.0 {
            return Err(PhysicsError::InvalidConfig(
                "gravity and walking_speed must not be negative".into(),
            ));
        }
        Ok(())
    }
}

/// Sandbox world configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SandboxConfig {
    /// Downward acceleration
    pub gravity: f32,

    /// Contact tolerance for grounded and touching checks
    pub skin: f32,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            skin: 0.02,
        }
    }
}

impl SandboxConfig {
    /// A world without gravity, handy for stationary test actors
    pub fn weightless() -> Self {
        Self {
            gravity: 0.0,
            ..Default::default()
        }
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }
}
