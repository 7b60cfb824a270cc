//! Carapace headless sandbox
//!
//! Builds a small level in the in-memory physics world, spawns the player and
//! a couple of enemies from the game configuration, then drives the player
//! with a scripted input track and logs what happens.
//!
//! Run with: cargo run -p carapace_sandbox
//!       or: cargo run --bin carapace -- path/to/game.toml
//!
//! # Environment
//!
//! - `CARAPACE_CONFIG`: configuration file, when no path is passed
//! - `CARAPACE_SAVE`: JSON save file, read at start and written at exit
//! - `RUST_LOG`: log filter (default `info`)

use carapace_game::{ConfigError, GameConfig, PlayerInput, SandboxScene, Services, Stage};
use carapace_gamestate::{keys, MemoryStore, Persistence, NO_SHELL};
use carapace_math::{Facing, Vec2};
use carapace_physics::{BodyDesc, CollisionLayer, SandboxWorld};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_CONFIG: &str = include_str!("../assets/game.toml");
const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: u32 = 60 * 30;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!();
    println!("  CARAPACE sandbox v{}", env!("CARGO_PKG_VERSION"));
    println!();

    match run() {
        Ok(summary) => summary.print(),
        Err(err) => {
            log::error!("Sandbox failed: {err}");
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Summary, Box<dyn Error>> {
    let config = load_config()?;
    let save_path = std::env::var_os("CARAPACE_SAVE").map(PathBuf::from);
    let store = Arc::new(load_store(save_path.as_deref())?);

    let world = SandboxWorld::default();
    let scene = Arc::new(SandboxScene::new(world.clone()));
    build_level(&scene);

    let services = Services::new(Arc::new(world.clone()), store.clone()).with_scene(scene.clone());
    let mut stage = Stage::new(config, services)?;

    let player_body = world.spawn_body(
        BodyDesc::new(Vec2::new(0.0, 0.5))
            .with_half_extents(stage.config().player.half_extents)
            .with_layer(CollisionLayer::PLAYER),
    );
    stage.spawn_player(Box::new(player_body))?;

    for (kind, x) in [("crab", 8.0), ("urchin", 20.0)] {
        let Ok(enemy) = stage.config().enemy(kind) else {
            log::warn!("No enemy kind {kind:?} configured, skipping");
            continue;
        };
        let body = world.spawn_body(
            BodyDesc::new(Vec2::new(x, enemy.half_extents.y))
                .with_half_extents(enemy.half_extents)
                .with_layer(CollisionLayer::ENEMY),
        );
        stage.spawn_enemy(kind, Box::new(body), Facing::Left)?;
    }

    let mut summary = Summary::default();
    for frame in 0..MAX_FRAMES {
        world.step(FRAME_TIME);
        for landed in stage.tick(script(frame), FRAME_TIME)? {
            log::info!("frame {frame}: {:?} -> {:?}", landed.target, landed.result);
            summary.hits += 1;
        }
        summary.frames = frame + 1;

        let Some(player) = stage.player() else {
            break;
        };
        if player.is_dead() || player.is_level_complete() {
            break;
        }
    }

    if let Some(player) = stage.player() {
        summary.health = player.health();
        summary.armor = player.armor();
        summary.coins = player.coins();
        summary.shell = player.shell_name().unwrap_or(NO_SHELL).to_string();
        summary.dead = player.is_dead();
        summary.complete = player.is_level_complete();
    }
    summary.enemies_left = stage.enemies().len();
    summary.chest_opened = scene.is_chest_opened();

    if let Some(path) = save_path {
        std::fs::write(&path, store.to_json()?)?;
        log::info!("Progress written to {}", path.display());
    }
    Ok(summary)
}

fn load_config() -> Result<GameConfig, ConfigError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CARAPACE_CONFIG").ok());
    match path {
        Some(path) => GameConfig::load(path),
        None => {
            log::info!("Using built-in game config");
            GameConfig::from_toml_str(DEFAULT_CONFIG)
        }
    }
}

fn load_store(path: Option<&Path>) -> Result<MemoryStore, Box<dyn Error>> {
    let Some(path) = path.filter(|p| p.exists()) else {
        return Ok(MemoryStore::new());
    };
    let store = MemoryStore::from_json(&std::fs::read_to_string(path)?)?;
    log::info!(
        "Loaded save from {}: shell={}",
        path.display(),
        store.get_string(keys::SHELL, NO_SHELL)
    );
    Ok(store)
}

/// Ground with a step, a row of coins, a spike pit and the finish
fn build_level(scene: &SandboxScene) {
    let world = scene.world();
    world.add_static(Vec2::new(15.0, -0.5), Vec2::new(30.0, 0.5), CollisionLayer::GROUND);
    world.add_static(Vec2::new(-15.5, 3.0), Vec2::new(0.5, 4.0), CollisionLayer::GROUND);
    world.add_static(Vec2::new(45.5, 3.0), Vec2::new(0.5, 4.0), CollisionLayer::GROUND);
    world.add_static(Vec2::new(14.0, 0.25), Vec2::new(1.0, 0.25), CollisionLayer::OBSTACLE);

    for i in 0..6 {
        scene.add_coin(Vec2::new(2.0 + i as f32, 0.5));
    }
    scene.add_spikes(Vec2::new(17.0, 0.1), Vec2::new(0.5, 0.1));
    scene.add_finish(Vec2::new(40.0, 1.0), Vec2::new(1.0, 1.0));
}

/// Walk right, swing every so often, hop over the step, pick up at the end
fn script(frame: u32) -> PlayerInput {
    let mut input = PlayerInput::walk(1.0);
    if frame % 45 == 0 {
        input = input.with_attack();
    }
    if frame % 150 == 100 {
        input = input.with_jump();
    }
    if frame % 150 == 110 {
        input = input.with_jump_release();
    }
    if frame % 30 == 15 {
        input = input.with_pick_up();
    }
    input
}

#[derive(Debug, Default)]
struct Summary {
    frames: u32,
    hits: usize,
    health: i32,
    armor: i32,
    coins: i32,
    shell: String,
    dead: bool,
    complete: bool,
    enemies_left: usize,
    chest_opened: bool,
}

impl Summary {
    fn print(&self) {
        println!();
        println!("  Frames played:  {} ({:.1}s)", self.frames, self.frames as f32 * FRAME_TIME);
        println!("  Hits landed:    {}", self.hits);
        println!("  Health/Armor:   {}/{}", self.health, self.armor);
        println!("  Coins:          {}", self.coins);
        println!("  Shell:          {}", self.shell);
        println!("  Enemies left:   {}", self.enemies_left);
        let outcome = match (self.dead, self.complete) {
            (true, _) => "died",
            (_, true) if self.chest_opened => "level complete, chest opened",
            (_, true) => "level complete",
            _ => "time up",
        };
        println!("  Outcome:        {outcome}");
        println!();
    }
}
