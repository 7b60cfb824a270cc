//! # carapace_physics - Collision Probes and Motion
//!
//! The gameplay core never simulates physics itself. It asks an external
//! engine questions through [`CollisionProbe`] and drives actor bodies
//! through [`Body`]. On top of those two seams sits the
//! [`MotionController`], the motion capability every actor owns.
//!
//! # Features
//!
//! - Collision layers and masks
//! - Probe queries: grounded, raycast, contacts, box overlap
//! - Walking, jumping and input locking
//! - Knockback as a decaying action that owns horizontal velocity
//! - An in-memory [`sandbox`] world for tests and headless runs
//!
//! # Example
//!
//! ```ignore
//! use carapace_physics::prelude::*;
//! use std::sync::Arc;
//!
//! let world = SandboxWorld::default();
//! world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
//! let body = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)));
//!
//! let mut motion = MotionController::new(Box::new(body), Arc::new(world.clone()), MotionConfig::default());
//! motion.walk(1.0);
//! world.step(1.0 / 60.0);
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod knockback;
pub mod layers;
pub mod motion;
pub mod query;
pub mod sandbox;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{Body, BodyDesc, BodyId};
    pub use crate::config::{MotionConfig, SandboxConfig};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::knockback::Knockback;
    pub use crate::layers::{CollisionLayer, LayerMask};
    pub use crate::motion::MotionController;
    pub use crate::query::{CollisionProbe, RaycastHit};
    pub use crate::sandbox::{SandboxBody, SandboxWorld};
    pub use carapace_math::{Facing, Vec2};
}

pub use prelude::*;
