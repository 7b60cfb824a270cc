//! Rigid body capability

use crate::layers::CollisionLayer;
use carapace_math::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a body or collider known to the collision probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u64);

impl BodyId {
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// A dynamic body driven by the external physics engine.
///
/// Implementations forward to whatever rigid body backs the actor. All
/// quantities are in world units with +Y up.
pub trait Body: Send + Sync {
    fn id(&self) -> BodyId;

    /// Center of the body
    fn position(&self) -> Vec2;

    fn velocity(&self) -> Vec2;

    fn set_velocity(&mut self, velocity: Vec2);

    /// Instantaneous change of momentum (unit mass)
    fn apply_impulse(&mut self, impulse: Vec2);

    fn gravity_scale(&self) -> f32;

    fn set_gravity_scale(&mut self, scale: f32);

    /// Half size of the body's box
    fn half_extents(&self) -> Vec2;

    /// Halve the body's height, keeping its feet in place
    fn set_crouched(&mut self, crouched: bool);

    fn layer(&self) -> CollisionLayer;

    fn set_layer(&mut self, layer: CollisionLayer);
}

/// Description used to spawn a body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    pub position: Vec2,
    pub half_extents: Vec2,
    pub layer: CollisionLayer,
    pub gravity_scale: f32,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            half_extents: Vec2::new(0.5, 0.5),
            layer: CollisionLayer::DEFAULT,
            gravity_scale: 1.0,
        }
    }
}

impl BodyDesc {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_half_extents(mut self, half_extents: Vec2) -> Self {
        self.half_extents = half_extents;
        self
    }

    pub fn with_layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }
}
