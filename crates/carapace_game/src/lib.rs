//! # carapace_game - Player, Enemies and Stage
//!
//! Puts the lower crates together into playable actors.
//!
//! # Features
//!
//! - [`Player`] with walking, jumping, hiding, shell swapping and coin redemption
//! - Perception-driven [`Enemy`] AI with contact damage and shell drops
//! - [`Combatant`]: the one place damage is resolved
//! - TOML [`GameConfig`] with validation
//! - Collaborator traits ([`Presentation`], [`AudioSink`], [`Hud`], [`Scene`])
//!   with logging and recording sinks
//! - [`Stage`] that ticks every actor and routes hits by body id
//!
//! # Example
//!
//! ```ignore
//! use carapace_game::prelude::*;
//!
//! let config = GameConfig::load("assets/game.toml")?;
//! let scene = Arc::new(SandboxScene::new(world.clone()));
//! let services = Services::new(Arc::new(world.clone()), Arc::new(MemoryStore::new()))
//!     .with_scene(scene);
//!
//! let mut stage = Stage::new(config, services)?;
//! stage.spawn_player(Box::new(player_body))?;
//! stage.spawn_enemy("crab", Box::new(crab_body), Facing::Left)?;
//!
//! loop {
//!     world.step(dt);
//!     for landed in stage.tick(PlayerInput::walk(1.0), dt)? {
//!         log::info!("{:?}", landed);
//!     }
//! }
//! ```

pub mod combatant;
pub mod config;
pub mod contacts;
pub mod enemy;
pub mod error;
pub mod player;
pub mod scene;
pub mod services;
pub mod sinks;
pub mod stage;

pub mod prelude {
    pub use crate::combatant::{Combatant, DamageOrigin};
    pub use crate::config::{EnemyConfig, GameConfig, PlayerConfig};
    pub use crate::contacts::ContactTracker;
    pub use crate::enemy::{Enemy, EnemyState};
    pub use crate::error::{ConfigError, GameError, Result};
    pub use crate::player::{Player, PlayerInput, PlayerState};
    pub use crate::scene::SandboxScene;
    pub use crate::services::{AudioSink, Hud, Presentation, Scene, Services, ShellVisual, Sound};
    pub use crate::sinks::{Event, LogSink, Recorder};
    pub use crate::stage::{Landed, Stage};
}

pub use prelude::*;
