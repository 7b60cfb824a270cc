//! Scene backed by the sandbox world

use crate::services::Scene;
use carapace_combat::{Damage, Hit, ProjectileSpawn};
use carapace_inventory::ShellStats;
use carapace_math::Vec2;
use carapace_physics::{Body, BodyDesc, BodyId, CollisionLayer, CollisionProbe, LayerMask, SandboxWorld};
use parking_lot::Mutex;
use std::collections::BTreeMap;

const SHELL_HALF_EXTENTS: Vec2 = Vec2::new(0.3, 0.3);
const COIN_HALF_EXTENTS: Vec2 = Vec2::new(0.25, 0.25);
const PROJECTILE_HALF_EXTENTS: Vec2 = Vec2::new(0.15, 0.15);

#[derive(Debug, Clone, Copy)]
struct InFlight {
    owner: BodyId,
    hostile: LayerMask,
    damage: Damage,
}

#[derive(Debug, Default)]
struct SceneState {
    shells: BTreeMap<BodyId, ShellStats>,
    projectiles: BTreeMap<BodyId, InFlight>,
    pending: Vec<(BodyId, f32)>,
    chest_opened: bool,
    player_deaths: u32,
}

/// Places shells, coins and projectiles as sandbox colliders
#[derive(Debug)]
pub struct SandboxScene {
    world: SandboxWorld,
    state: Mutex<SceneState>,
}

impl SandboxScene {
    pub fn new(world: SandboxWorld) -> Self {
        Self {
            world,
            state: Mutex::new(SceneState::default()),
        }
    }

    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    pub fn add_coin(&self, position: Vec2) -> BodyId {
        self.world.add_sensor(position, COIN_HALF_EXTENTS, CollisionLayer::COINS)
    }

    pub fn add_spikes(&self, center: Vec2, half_extents: Vec2) -> BodyId {
        self.world.add_sensor(center, half_extents, CollisionLayer::HAZARD)
    }

    pub fn add_finish(&self, center: Vec2, half_extents: Vec2) -> BodyId {
        self.world.add_sensor(center, half_extents, CollisionLayer::FINISH)
    }

    /// Shells lying in the world, by collider
    pub fn shells(&self) -> Vec<(BodyId, String)> {
        self.state
            .lock()
            .shells
            .iter()
            .map(|(id, shell)| (*id, shell.name.clone()))
            .collect()
    }

    pub fn shell(&self, id: BodyId) -> Option<ShellStats> {
        self.state.lock().shells.get(&id).cloned()
    }

    pub fn projectile_count(&self) -> usize {
        self.state.lock().projectiles.len()
    }

    pub fn is_chest_opened(&self) -> bool {
        self.state.lock().chest_opened
    }

    pub fn player_deaths(&self) -> u32 {
        self.state.lock().player_deaths
    }

    fn remove(&self, state: &mut SceneState, body: BodyId) {
        state.shells.remove(&body);
        state.projectiles.remove(&body);
        if self.world.remove(body) {
            log::debug!("Despawned {body:?}");
        }
    }
}

impl Scene for SandboxScene {
    fn spawn_projectile(&self, owner: BodyId, hostile: LayerMask, spawn: &ProjectileSpawn) {
        let mut body = self.world.spawn_body(
            BodyDesc::new(spawn.position)
                .with_half_extents(PROJECTILE_HALF_EXTENTS)
                .with_layer(CollisionLayer::PROJECTILE)
                .with_gravity_scale(0.0),
        );
        body.set_velocity(spawn.velocity);
        self.state.lock().projectiles.insert(
            body.id(),
            InFlight {
                owner,
                hostile,
                damage: spawn.damage,
            },
        );
    }

    fn place_shell(&self, shell: ShellStats, position: Vec2) {
        let id = self.world.add_sensor(position, SHELL_HALF_EXTENTS, CollisionLayer::SHELLS);
        log::debug!("Shell {} placed as {id:?}", shell.name);
        self.state.lock().shells.insert(id, shell);
    }

    fn take_shell(&self, id: BodyId) -> Option<ShellStats> {
        let shell = self.state.lock().shells.remove(&id)?;
        self.world.remove(id);
        Some(shell)
    }

    fn despawn(&self, body: BodyId, delay: f32) {
        let mut state = self.state.lock();
        if delay <= 0.0 {
            self.remove(&mut state, body);
        } else {
            state.pending.push((body, delay));
        }
    }

    fn player_died(&self) {
        self.state.lock().player_deaths += 1;
    }

    fn open_chest(&self) {
        self.state.lock().chest_opened = true;
    }

    fn advance(&self, delta_time: f32) -> Vec<Hit> {
        let mut state = self.state.lock();

        let mut due = Vec::new();
        state.pending.retain_mut(|(body, delay)| {
            *delay -= delta_time;
            if *delay <= 0.0 {
                due.push(*body);
                false
            } else {
                true
            }
        });
        for body in due {
            self.remove(&mut state, body);
        }

        let mut hits = Vec::new();
        let mut spent = Vec::new();
        for (id, flight) in &state.projectiles {
            if !self.world.contains(*id) {
                spent.push(*id);
                continue;
            }
            let target = self
                .world
                .contacts(*id, flight.hostile)
                .into_iter()
                .find(|target| *target != flight.owner);
            if let Some(target) = target {
                hits.push(Hit::new(target, flight.damage));
                spent.push(*id);
            } else if self.world.is_touching(*id, LayerMask::WALKABLE) {
                spent.push(*id);
            }
        }
        for id in spent {
            self.remove(&mut state, id);
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carapace_math::Facing;
    use carapace_physics::SandboxConfig;

    #[test]
    fn test_shell_round_trip_through_world() {
        let scene = SandboxScene::new(SandboxWorld::default());
        scene.place_shell(ShellStats::new("SnailShell").with_armor(1), Vec2::new(2.0, 0.3));

        let shells = scene.shells();
        assert_eq!(shells.len(), 1);
        let (id, name) = shells[0].clone();
        assert_eq!(name, "SnailShell");
        assert!(scene.world().contains(id));

        assert_eq!(scene.take_shell(id).map(|s| s.armor), Some(1));
        assert!(!scene.world().contains(id));
        assert_eq!(scene.take_shell(id), None);
    }

    #[test]
    fn test_delayed_despawn() {
        let scene = SandboxScene::new(SandboxWorld::default());
        let coin = scene.add_coin(Vec2::ZERO);

        scene.despawn(coin, 1.0);
        scene.advance(0.5);
        assert!(scene.world().contains(coin));
        scene.advance(0.6);
        assert!(!scene.world().contains(coin));
    }

    #[test]
    fn test_projectile_hits_hostile_not_owner() {
        let world = SandboxWorld::new(SandboxConfig::weightless());
        let scene = SandboxScene::new(world.clone());
        let owner = world.spawn_body(BodyDesc::new(Vec2::ZERO).with_layer(CollisionLayer::PLAYER));
        let enemy = world.spawn_body(BodyDesc::new(Vec2::new(3.0, 0.0)).with_layer(CollisionLayer::ENEMY));

        let damage = Damage::new(Vec2::new(1.0, 0.0), 20.0, 1);
        scene.spawn_projectile(
            owner.id(),
            LayerMask::of(CollisionLayer::ENEMY),
            &ProjectileSpawn {
                position: Vec2::new(1.0, 0.0),
                velocity: Vec2::new(8.0, 0.0),
                facing: Facing::Right,
                damage,
            },
        );
        assert_eq!(scene.projectile_count(), 1);

        let mut hits = Vec::new();
        for _ in 0..60 {
            world.step(1.0 / 60.0);
            hits.extend(scene.advance(1.0 / 60.0));
        }
        assert_eq!(hits, vec![Hit::new(enemy.id(), damage)]);
        assert_eq!(scene.projectile_count(), 0);
    }

    #[test]
    fn test_projectile_stops_at_wall() {
        let world = SandboxWorld::new(SandboxConfig::weightless());
        let scene = SandboxScene::new(world.clone());
        world.add_static(Vec2::new(2.0, 0.0), Vec2::new(0.5, 2.0), CollisionLayer::GROUND);

        scene.spawn_projectile(
            BodyId(999),
            LayerMask::of(CollisionLayer::ENEMY),
            &ProjectileSpawn {
                position: Vec2::ZERO,
                velocity: Vec2::new(8.0, 0.0),
                facing: Facing::Right,
                damage: Damage::new(Vec2::ZERO, 0.0, 1),
            },
        );
        for _ in 0..30 {
            world.step(1.0 / 60.0);
            assert!(scene.advance(1.0 / 60.0).is_empty());
        }
        assert_eq!(scene.projectile_count(), 0);
    }
}
