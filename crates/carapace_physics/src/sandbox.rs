//! In-memory axis-aligned world.
//!
//! A small kinematic stand-in for the physics engine: boxes, gravity, and
//! push-out resolution against solid static geometry. Dynamic bodies never
//! block each other, they only report contacts. Used by tests and the
//! headless sandbox binary.

use crate::body::{Body, BodyDesc, BodyId};
use crate::config::SandboxConfig;
use crate::error::{PhysicsError, Result};
use crate::layers::{CollisionLayer, LayerMask};
use crate::query::{CollisionProbe, RaycastHit};
use carapace_math::Vec2;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Aabb {
    min: Vec2,
    max: Vec2,
}

impl Aabb {
    fn new(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    fn overlaps(&self, other: &Aabb, skin: f32) -> bool {
        self.min.x <= other.max.x + skin
            && self.max.x + skin >= other.min.x
            && self.min.y <= other.max.y + skin
            && self.max.y + skin >= other.min.y
    }

    fn penetrates(&self, other: &Aabb) -> bool {
        const EPS: f32 = 1e-5;
        self.min.x < other.max.x - EPS
            && self.max.x > other.min.x + EPS
            && self.min.y < other.max.y - EPS
            && self.max.y > other.min.y + EPS
    }

    /// Entry distance of a normalized ray, 0 when starting inside
    fn ray_entry(&self, origin: Vec2, dir: Vec2, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = max_distance;
        for (o, d, lo, hi) in [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
        ] {
            if d.abs() < 1e-8 {
                if o < lo || o > hi {
                    return None;
                }
            } else {
                let mut t1 = (lo - o) / d;
                let mut t2 = (hi - o) / d;
                if t1 > t2 {
                    std::mem::swap(&mut t1, &mut t2);
                }
                t_min = t_min.max(t1);
                t_max = t_max.min(t2);
                if t_min > t_max {
                    return None;
                }
            }
        }
        Some(t_min)
    }
}

#[derive(Debug, Clone)]
struct Dynamics {
    velocity: Vec2,
    gravity_scale: f32,
    standing_half_extents: Vec2,
    crouched: bool,
    impulses: u32,
}

#[derive(Debug, Clone)]
struct Collider {
    center: Vec2,
    half_extents: Vec2,
    layer: CollisionLayer,
    solid: bool,
    dynamics: Option<Dynamics>,
}

impl Collider {
    fn aabb(&self) -> Aabb {
        Aabb::new(self.center, self.half_extents)
    }
}

#[derive(Debug)]
struct WorldState {
    config: SandboxConfig,
    next_id: u64,
    colliders: BTreeMap<BodyId, Collider>,
}

impl WorldState {
    fn insert(&mut self, collider: Collider) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, collider);
        id
    }

    fn dynamics_mut(&mut self, id: BodyId) -> Option<(&mut Vec2, &mut Vec2, &mut Dynamics)> {
        self.colliders.get_mut(&id).and_then(|c| {
            let Collider {
                center,
                half_extents,
                dynamics,
                ..
            } = c;
            dynamics.as_mut().map(|d| (center, half_extents, d))
        })
    }
}

/// Shared handle to the sandbox world
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    state: Arc<RwLock<WorldState>>,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

impl SandboxWorld {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(WorldState {
                config,
                next_id: 1,
                colliders: BTreeMap::new(),
            })),
        }
    }

    /// Add solid static geometry
    pub fn add_static(&self, center: Vec2, half_extents: Vec2, layer: CollisionLayer) -> BodyId {
        self.state.write().insert(Collider {
            center,
            half_extents,
            layer,
            solid: true,
            dynamics: None,
        })
    }

    /// Add a non-solid trigger volume (coins, spikes, shells, finish zone)
    pub fn add_sensor(&self, center: Vec2, half_extents: Vec2, layer: CollisionLayer) -> BodyId {
        self.state.write().insert(Collider {
            center,
            half_extents,
            layer,
            solid: false,
            dynamics: None,
        })
    }

    /// Spawn a dynamic body and return its handle
    pub fn spawn_body(&self, desc: BodyDesc) -> SandboxBody {
        let id = self.state.write().insert(Collider {
            center: desc.position,
            half_extents: desc.half_extents,
            layer: desc.layer,
            solid: false,
            dynamics: Some(Dynamics {
                velocity: Vec2::ZERO,
                gravity_scale: desc.gravity_scale,
                standing_half_extents: desc.half_extents,
                crouched: false,
                impulses: 0,
            }),
        });
        log::trace!("Spawned sandbox body {:?} at {:?}", id, desc.position);
        SandboxBody {
            id,
            world: self.clone(),
        }
    }

    /// Remove a body or collider; returns whether it existed
    pub fn remove(&self, id: BodyId) -> bool {
        self.state.write().colliders.remove(&id).is_some()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.state.read().colliders.contains_key(&id)
    }

    pub fn set_position(&self, id: BodyId, position: Vec2) -> Result<()> {
        let mut state = self.state.write();
        let collider = state
            .colliders
            .get_mut(&id)
            .ok_or(PhysicsError::BodyNotFound(id))?;
        collider.center = position;
        Ok(())
    }

    pub fn velocity(&self, id: BodyId) -> Option<Vec2> {
        self.state
            .read()
            .colliders
            .get(&id)
            .and_then(|c| c.dynamics.as_ref())
            .map(|d| d.velocity)
    }

    pub fn layer_of(&self, id: BodyId) -> Option<CollisionLayer> {
        self.state.read().colliders.get(&id).map(|c| c.layer)
    }

    /// Number of impulses a body has received
    pub fn impulse_count(&self, id: BodyId) -> u32 {
        self.state
            .read()
            .colliders
            .get(&id)
            .and_then(|c| c.dynamics.as_ref())
            .map(|d| d.impulses)
            .unwrap_or(0)
    }

    /// Integrate velocities and push dynamic bodies out of solid geometry
    pub fn step(&self, dt: f32) {
        let mut state = self.state.write();
        let gravity = state.config.gravity;
        let solids: Vec<Aabb> = state
            .colliders
            .values()
            .filter(|c| c.solid)
            .map(Collider::aabb)
            .collect();

        for collider in state.colliders.values_mut() {
            let Some(dynamics) = collider.dynamics.as_mut() else {
                continue;
            };
            dynamics.velocity.y -= gravity * dynamics.gravity_scale * dt;
            let half = collider.half_extents;

            collider.center.x += dynamics.velocity.x * dt;
            for solid in &solids {
                if Aabb::new(collider.center, half).penetrates(solid) {
                    collider.center.x = if dynamics.velocity.x > 0.0 {
                        solid.min.x - half.x
                    } else {
                        solid.max.x + half.x
                    };
                    dynamics.velocity.x = 0.0;
                }
            }

            collider.center.y += dynamics.velocity.y * dt;
            for solid in &solids {
                if Aabb::new(collider.center, half).penetrates(solid) {
                    collider.center.y = if dynamics.velocity.y > 0.0 {
                        solid.min.y - half.y
                    } else {
                        solid.max.y + half.y
                    };
                    dynamics.velocity.y = 0.0;
                }
            }
        }
    }

    fn with_body<R>(&self, id: BodyId, f: impl FnOnce(&Collider) -> R) -> Option<R> {
        self.state.read().colliders.get(&id).map(f)
    }
}

impl CollisionProbe for SandboxWorld {
    fn is_grounded_at(&self, body: BodyId) -> bool {
        let state = self.state.read();
        let Some(collider) = state.colliders.get(&body) else {
            return false;
        };
        let feet = collider.aabb();
        let skin = state.config.skin;
        state.colliders.iter().any(|(id, other)| {
            if *id == body || !other.solid || !LayerMask::WALKABLE.contains(other.layer) {
                return false;
            }
            let ground = other.aabb();
            (feet.min.y - ground.max.y).abs() <= skin
                && feet.min.x < ground.max.x
                && feet.max.x > ground.min.x
        })
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let state = self.state.read();
        state
            .colliders
            .iter()
            .filter(|(_, c)| mask.contains(c.layer))
            .filter_map(|(id, c)| {
                c.aabb()
                    .ray_entry(origin, dir, max_distance)
                    .map(|distance| RaycastHit {
                        body: *id,
                        layer: c.layer,
                        point: origin + dir * distance,
                        distance,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn contacts(&self, body: BodyId, mask: LayerMask) -> Vec<BodyId> {
        let state = self.state.read();
        let Some(collider) = state.colliders.get(&body) else {
            return Vec::new();
        };
        let aabb = collider.aabb();
        let skin = state.config.skin;
        state
            .colliders
            .iter()
            .filter(|(id, c)| **id != body && mask.contains(c.layer) && aabb.overlaps(&c.aabb(), skin))
            .map(|(id, _)| *id)
            .collect()
    }

    fn overlap_box(&self, center: Vec2, half_extents: Vec2, mask: LayerMask) -> Vec<BodyId> {
        let query = Aabb::new(center, half_extents);
        self.state
            .read()
            .colliders
            .iter()
            .filter(|(_, c)| mask.contains(c.layer) && query.overlaps(&c.aabb(), 0.0))
            .map(|(id, _)| *id)
            .collect()
    }

    fn body_position(&self, body: BodyId) -> Option<Vec2> {
        self.with_body(body, |c| c.center)
    }
}

/// A dynamic body living in a [`SandboxWorld`]
#[derive(Debug, Clone)]
pub struct SandboxBody {
    id: BodyId,
    world: SandboxWorld,
}

impl SandboxBody {
    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }
}

impl Body for SandboxBody {
    fn id(&self) -> BodyId {
        self.id
    }

    fn position(&self) -> Vec2 {
        self.world.with_body(self.id, |c| c.center).unwrap_or_default()
    }

    fn velocity(&self) -> Vec2 {
        self.world.velocity(self.id).unwrap_or_default()
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if let Some((_, _, d)) = self.world.state.write().dynamics_mut(self.id) {
            d.velocity = velocity;
        }
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        if let Some((_, _, d)) = self.world.state.write().dynamics_mut(self.id) {
            d.velocity += impulse;
            d.impulses += 1;
        }
    }

    fn gravity_scale(&self) -> f32 {
        self.world
            .with_body(self.id, |c| c.dynamics.as_ref().map(|d| d.gravity_scale))
            .flatten()
            .unwrap_or(1.0)
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        if let Some((_, _, d)) = self.world.state.write().dynamics_mut(self.id) {
            d.gravity_scale = scale;
        }
    }

    fn half_extents(&self) -> Vec2 {
        self.world.with_body(self.id, |c| c.half_extents).unwrap_or_default()
    }

    fn set_crouched(&mut self, crouched: bool) {
        let mut state = self.world.state.write();
        let Some((center, half, d)) = state.dynamics_mut(self.id) else {
            return;
        };
        if d.crouched == crouched {
            return;
        }
        let feet = center.y - half.y;
        let standing = d.standing_half_extents;
        *half = if crouched {
            standing.with_y(standing.y * 0.5)
        } else {
            standing
        };
        center.y = feet + half.y;
        d.crouched = crouched;
    }

    fn layer(&self) -> CollisionLayer {
        self.world.layer_of(self.id).unwrap_or_default()
    }

    fn set_layer(&mut self, layer: CollisionLayer) {
        if let Some(c) = self.world.state.write().colliders.get_mut(&self.id) {
            c.layer = layer;
        }
    }
}
