//! Collision layers and masks

use serde::{Deserialize, Serialize};

/// A collision layer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollisionLayer(pub u32);

impl CollisionLayer {
    /// Default layer
    pub const DEFAULT: Self = Self(0);
    /// Walkable terrain
    pub const GROUND: Self = Self(1);
    /// Player body
    pub const PLAYER: Self = Self(2);
    /// Enemy bodies
    pub const ENEMY: Self = Self(3);
    /// Shells lying in the world
    pub const SHELLS: Self = Self(4);
    /// Actors that cannot currently be hit
    pub const INVULNERABLE: Self = Self(5);
    /// Walls and other dash-stopping geometry
    pub const OBSTACLE: Self = Self(6);
    /// Spikes
    pub const HAZARD: Self = Self(7);
    /// Collectible coins
    pub const COINS: Self = Self(8);
    /// Level end zone
    pub const FINISH: Self = Self(9);
    /// Launched projectiles
    pub const PROJECTILE: Self = Self(10);

    /// Create a custom layer
    pub const fn custom(id: u32) -> Self {
        Self(id)
    }

    /// Get the layer as a bitmask
    pub const fn as_mask(&self) -> u32 {
        1 << self.0
    }
}

impl Default for CollisionLayer {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Set of collision layers used to filter queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);
    /// Geometry an actor can stand on
    pub const WALKABLE: Self = Self(CollisionLayer::GROUND.as_mask() | CollisionLayer::OBSTACLE.as_mask());
    /// Geometry that blocks line of sight
    pub const SIGHT_BLOCKING: Self = Self::WALKABLE;

    /// Mask containing a single layer
    pub const fn of(layer: CollisionLayer) -> Self {
        Self(layer.as_mask())
    }

    /// Mask from a list of layers
    pub fn from_layers(layers: &[CollisionLayer]) -> Self {
        Self(layers.iter().fold(0u32, |acc, l| acc | l.as_mask()))
    }

    /// Add a layer
    pub const fn with(self, layer: CollisionLayer) -> Self {
        Self(self.0 | layer.as_mask())
    }

    /// Remove a layer
    pub const fn without(self, layer: CollisionLayer) -> Self {
        Self(self.0 & !layer.as_mask())
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(&self, layer: CollisionLayer) -> bool {
        self.0 & layer.as_mask() != 0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        Self::of(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask() {
        assert_eq!(CollisionLayer::DEFAULT.as_mask(), 1);
        assert_eq!(CollisionLayer::PLAYER.as_mask(), 4);

        let mask = LayerMask::from_layers(&[CollisionLayer::PLAYER, CollisionLayer::ENEMY]);
        assert!(mask.contains(CollisionLayer::PLAYER));
        assert!(mask.contains(CollisionLayer::ENEMY));
        assert!(!mask.contains(CollisionLayer::GROUND));
    }

    #[test]
    fn test_mask_builders() {
        let mask = LayerMask::SIGHT_BLOCKING.with(CollisionLayer::PLAYER);
        assert!(mask.contains(CollisionLayer::GROUND));
        assert!(mask.contains(CollisionLayer::OBSTACLE));
        assert!(mask.contains(CollisionLayer::PLAYER));

        let mask = mask.without(CollisionLayer::PLAYER);
        assert_eq!(mask, LayerMask::SIGHT_BLOCKING);
        assert!(LayerMask::NONE.is_empty());
    }
}
