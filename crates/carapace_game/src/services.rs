//! Collaborators the gameplay core calls into.
//!
//! Every sink is fire-and-forget and takes `&self`; implementations that
//! record or mutate use interior locking. Actors receive the whole bundle as
//! [`Services`] at construction.

use crate::sinks::LogSink;
use carapace_combat::{AttackKind, Hit, ProjectileSpawn};
use carapace_gamestate::Persistence;
use carapace_inventory::ShellStats;
use carapace_math::Vec2;
use carapace_physics::{BodyId, CollisionProbe, LayerMask};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the worn shell is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellVisual {
    None,
    Intact,
    Cracked,
}

/// Sound effects the core asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Jump,
    Attack,
    Pickup,
    Hide,
    Hit,
    Die,
    Coin,
    ShellRedeem,
    HpIncrease,
}

/// Animation and effect triggers
pub trait Presentation: Send + Sync {
    fn on_attack_start(&self, _actor: BodyId, _kind: AttackKind) {}
    fn on_hurt(&self, _actor: BodyId) {}
    fn on_death(&self, _actor: BodyId) {}
    fn on_hide(&self, _actor: BodyId, _hiding: bool) {}
    fn on_move(&self, _actor: BodyId, _moving: bool) {}
    fn on_grounded(&self, _actor: BodyId, _grounded: bool) {}
    fn on_invulnerable(&self, _actor: BodyId, _active: bool) {}
    fn on_shell_swap(&self, _actor: BodyId) {}
    fn set_shell_visual(&self, _actor: BodyId, _visual: ShellVisual) {}
    fn emit_particles(&self, _actor: BodyId, _count: u32) {}
}

pub trait AudioSink: Send + Sync {
    fn play_sound(&self, sound: Sound);
}

/// Player-facing counters. Values are already clamped for display.
pub trait Hud: Send + Sync {
    fn update_health(&self, health: i32);
    fn update_armor(&self, armor: i32);
    fn update_coins(&self, coins: i32);
}

/// Object instantiation and teardown
pub trait Scene: Send + Sync {
    /// Put a projectile into the world; it damages bodies in `hostile`
    fn spawn_projectile(&self, owner: BodyId, hostile: LayerMask, spawn: &ProjectileSpawn);

    /// Leave a shell lying in the world
    fn place_shell(&self, shell: ShellStats, position: Vec2);

    /// Pick up the shell behind a world collider
    fn take_shell(&self, id: BodyId) -> Option<ShellStats>;

    /// Remove a body from the world after `delay` seconds
    fn despawn(&self, body: BodyId, delay: f32);

    fn player_died(&self) {}

    fn open_chest(&self) {}

    /// Advance scene-owned objects; returns the hits of projectiles that landed
    fn advance(&self, _delta_time: f32) -> Vec<Hit> {
        Vec::new()
    }
}

/// Every collaborator an actor talks to
#[derive(Clone)]
pub struct Services {
    pub probe: Arc<dyn CollisionProbe>,
    pub persistence: Arc<dyn Persistence>,
    pub presentation: Arc<dyn Presentation>,
    pub audio: Arc<dyn AudioSink>,
    pub hud: Arc<dyn Hud>,
    pub scene: Arc<dyn Scene>,
}

impl Services {
    /// Sinks default to [`LogSink`]
    pub fn new(probe: Arc<dyn CollisionProbe>, persistence: Arc<dyn Persistence>) -> Self {
        let log = Arc::new(LogSink);
        Self {
            probe,
            persistence,
            presentation: log.clone(),
            audio: log.clone(),
            hud: log.clone(),
            scene: log,
        }
    }

    pub fn with_presentation(mut self, presentation: Arc<dyn Presentation>) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_audio(mut self, audio: Arc<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_hud(mut self, hud: Arc<dyn Hud>) -> Self {
        self.hud = hud;
        self
    }

    pub fn with_scene(mut self, scene: Arc<dyn Scene>) -> Self {
        self.scene = scene;
        self
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
