//! Collision probe queries (raycasts, contacts, overlaps)

use crate::body::BodyId;
use crate::layers::{CollisionLayer, LayerMask};
use carapace_math::Vec2;

/// Result of a raycast query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The body or collider that was hit
    pub body: BodyId,
    /// Layer of the hit collider
    pub layer: CollisionLayer,
    /// Hit point in world space
    pub point: Vec2,
    /// Distance from ray origin
    pub distance: f32,
}

/// Read-only collision queries answered by the physics engine.
pub trait CollisionProbe: Send + Sync {
    /// Whether the body stands on walkable geometry
    fn is_grounded_at(&self, body: BodyId) -> bool;

    /// First collider in `mask` hit by the ray, if any. `direction` need not be normalized.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;

    /// Colliders in `mask` currently touching the body
    fn contacts(&self, body: BodyId, mask: LayerMask) -> Vec<BodyId>;

    /// Whether the body touches anything in `mask`
    fn is_touching(&self, body: BodyId, mask: LayerMask) -> bool {
        !self.contacts(body, mask).is_empty()
    }

    /// Colliders in `mask` overlapping the given box
    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: LayerMask) -> Vec<BodyId>;

    /// Current position of a body, `None` once it has been removed
    fn body_position(&self, body: BodyId) -> Option<Vec2>;
}
