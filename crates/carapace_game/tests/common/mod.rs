//! Shared level harness for the scenario tests

#![allow(dead_code)]

use carapace_combat::{AttackConfig, DashConfig, ProjectileConfig};
use carapace_game::prelude::*;
use carapace_gamestate::MemoryStore;
use carapace_inventory::ShellStats;
use carapace_math::{Facing, Vec2};
use carapace_physics::{BodyDesc, BodyId, CollisionLayer, SandboxWorld};
use std::sync::Arc;

pub const DT: f32 = 1.0 / 60.0;

pub fn snail() -> ShellStats {
    ShellStats::new("SnailShell").with_armor(1)
}

pub fn spiky() -> ShellStats {
    ShellStats::new("SpikyShell")
        .with_armor(2)
        .with_attack(AttackConfig::Dash(DashConfig::default()))
}

pub fn conch() -> ShellStats {
    ShellStats::new("ConchShell")
        .with_armor(1)
        .with_attack(AttackConfig::Projectile(ProjectileConfig::default()))
}

/// A config with the three shells and a blind, harmless enemy kind
pub fn config() -> GameConfig {
    GameConfig::default()
        .with_shell(snail())
        .with_shell(spiky())
        .with_shell(conch())
        .with_redeem_shell("SnailShell")
        .with_enemy("dummy", dummy())
}

/// Sees nothing beyond half a unit and walks nowhere
pub fn dummy() -> EnemyConfig {
    EnemyConfig::default().with_vision(
        carapace_ai::VisionConfig::default()
            .with_vision_range(0.0)
            .with_detection_range(0.5),
    )
}

pub struct Level {
    pub world: SandboxWorld,
    pub scene: Arc<SandboxScene>,
    pub recorder: Arc<Recorder>,
    pub store: Arc<MemoryStore>,
    pub stage: Stage,
    pub player: BodyId,
}

impl Level {
    pub fn new(config: GameConfig, store: MemoryStore) -> Self {
        let world = SandboxWorld::default();
        world.add_static(Vec2::new(0.0, -0.5), Vec2::new(50.0, 0.5), CollisionLayer::GROUND);
        let scene = Arc::new(SandboxScene::new(world.clone()));
        let recorder = Arc::new(Recorder::new());
        let store = Arc::new(store);
        let services = Services::new(Arc::new(world.clone()), store.clone())
            .with_presentation(recorder.clone())
            .with_audio(recorder.clone())
            .with_hud(recorder.clone())
            .with_scene(scene.clone());

        let mut stage = Stage::new(config, services).unwrap();
        let body = world.spawn_body(BodyDesc::new(Vec2::new(0.0, 0.5)).with_layer(CollisionLayer::PLAYER));
        let player = stage.spawn_player(Box::new(body)).unwrap();
        Self {
            world,
            scene,
            recorder,
            store,
            stage,
            player,
        }
    }

    pub fn spawn_enemy(&mut self, kind: &str, x: f32, facing: Facing) -> BodyId {
        let body = self
            .world
            .spawn_body(BodyDesc::new(Vec2::new(x, 0.5)).with_layer(CollisionLayer::ENEMY));
        self.stage.spawn_enemy(kind, Box::new(body), facing).unwrap()
    }

    pub fn player(&self) -> &Player {
        self.stage.player().unwrap()
    }

    pub fn player_mut(&mut self) -> &mut Player {
        self.stage.player_mut().unwrap()
    }

    pub fn enemy(&self, id: BodyId) -> Option<&Enemy> {
        self.stage.enemy(id)
    }

    /// Step physics then the stage, once
    pub fn frame(&mut self, input: PlayerInput) -> Vec<Landed> {
        self.world.step(DT);
        self.stage.tick(input, DT).unwrap()
    }

    /// Run `frames` frames, the first with `input` and the rest idle
    pub fn press(&mut self, input: PlayerInput, frames: usize) -> Vec<Landed> {
        let mut landed = self.frame(input);
        for _ in 1..frames {
            landed.extend(self.frame(PlayerInput::idle()));
        }
        landed
    }

    pub fn idle(&mut self, frames: usize) -> Vec<Landed> {
        self.press(PlayerInput::idle(), frames)
    }
}
