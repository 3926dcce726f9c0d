//! Buccaneer headless runner.
//!
//! Drives the entity runtime without a window: loads (or builds) a level and
//! an overworld, enters the level, walks a player box through it collecting
//! items, then returns to the overworld and walks the icon to the next node.
//! Draw lists and progress are logged instead of painted.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -- --ticks 600
//! cargo run -- --level levels/0.json --overworld overworld.json
//! ```

use std::path::PathBuf;

use buccaneer::components::boxcollider::BoxCollider;
use buccaneer::components::collectible::CollectibleKind;
use buccaneer::components::sprite::ImageHandle;
use buccaneer::components::waypoint::{Direction, DirectionalFrames};
use buccaneer::error::LevelError;
use buccaneer::game::{Game, Stage};
use buccaneer::resources::gameconfig::GameConfig;
use buccaneer::resources::imagestore::ImageStore;
use buccaneer::resources::leveldesc::{LevelDescription, OverworldDescription};
use clap::Parser;
use glam::Vec2;
use log::{error, info};
use rustc_hash::FxHashMap;

const DEMO_LEVEL: &str = r#"{
    "name": "demo beach",
    "entities": [
        {"kind": "static", "pos": [0, 432], "image": "terrain", "layer": "terrain", "collidable": true},
        {"kind": "cloud", "pos": [900, 160], "image": "cloud"},
        {"kind": "animated", "pos": [64, 368], "frames": "flag", "layer": "main"},
        {"kind": "patrol", "start": [300, 200], "end": [700, 200], "axis": "x", "speed": 150, "frames": "saw", "damage": true},
        {"kind": "patrol", "start": [800, 100], "end": [800, 380], "axis": "y", "speed": 80, "frames": "boat", "flip": true},
        {"kind": "orbit", "center": [500, 250], "radius": 80, "speed": 180, "start_angle": 0, "image": "spike"},
        {"kind": "orbit", "center": [900, 250], "radius": 60, "speed": 90, "start_angle": 0, "end_angle": 180, "image": "spike"},
        {"kind": "item", "item": "gold", "pos": [200, 400]},
        {"kind": "item", "item": "diamond", "pos": [400, 400]},
        {"kind": "item", "item": "potion", "pos": [600, 400]}
    ]
}"#;

const DEMO_OVERWORLD: &str = r#"{
    "nodes": [
        {"level": 0, "grid_pos": [2, 2], "edges": {"right": {"path": 1}}},
        {"level": 1, "grid_pos": [6, 2], "edges": {"left": {"path": 1, "reverse": true}, "down": {"path": 2}}},
        {"level": 2, "grid_pos": [6, 5], "edges": {"up": {"path": 2, "reverse": true}}}
    ],
    "paths": {
        "1": [[2, 2], [6, 2]],
        "2": [[6, 2], [6, 5]]
    }
}"#;

const PLAYER_SPEED: f32 = 200.0;

#[derive(Parser)]
#[command(version, about = "Headless simulation of the Buccaneer entity runtime")]
struct Cli {
    /// Level description (JSON). A built-in demo level is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Overworld description (JSON). A built-in demo graph is used when omitted.
    #[arg(long, value_name = "PATH")]
    overworld: Option<PathBuf>,

    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to simulate per stage.
    #[arg(long, default_value_t = 300)]
    ticks: u32,

    /// Seconds per tick.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

/// Hand out sequential handles for every key the demo content uses.
fn demo_images() -> ImageStore {
    let mut store = ImageStore::new();
    let mut next = 0u32;
    let mut handle = move || {
        next += 1;
        ImageHandle(next)
    };
    let mut frames = |n: usize| -> Vec<ImageHandle> { (0..n).map(|_| handle()).collect() };

    for key in ["terrain", "cloud", "spike", "path", "node"] {
        store.insert_frames(key, frames(1));
    }
    store.set_size("terrain", Vec2::new(1280.0, 64.0));
    store.set_size("cloud", Vec2::new(192.0, 64.0));
    store.set_size("spike", Vec2::new(48.0, 48.0));
    store.insert_frames("flag", frames(4));
    store.insert_frames("saw", frames(2));
    store.insert_frames("boat", frames(4));
    store.set_size("boat", Vec2::new(192.0, 48.0));
    for kind in CollectibleKind::ALL {
        let key = format!("items/{kind}");
        store.insert_frames(key.clone(), frames(4));
        store.set_size(key, Vec2::new(32.0, 32.0));
    }
    store.insert_frames("particle", frames(5));
    store.insert_directional(
        "icon",
        DirectionalFrames {
            idle: frames(4).into(),
            up: frames(4).into(),
            down: frames(4).into(),
            left: frames(4).into(),
            right: frames(4).into(),
        },
    );
    store
}

fn run(cli: Cli) -> Result<(), LevelError> {
    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        info!("{e}; using defaults");
    }

    let level = match &cli.level {
        Some(path) => LevelDescription::load(path)?,
        None => LevelDescription::from_json(DEMO_LEVEL)?,
    };
    let overworld = match &cli.overworld {
        Some(path) => OverworldDescription::load(path)?,
        None => OverworldDescription::from_json(DEMO_OVERWORLD)?,
    };
    let mut levels = FxHashMap::default();
    levels.insert(0, level);

    let mut game = Game::new(config, demo_images(), levels, overworld)?;
    game.enter_selected_level()?;

    let player_box = BoxCollider::new(48.0, 56.0).with_offset(Vec2::new(-24.0, -28.0));
    let mut player = Vec2::new(0.0, 400.0);
    let mut collected = 0;
    for _ in 0..cli.ticks {
        game.advance(cli.dt);
        player.x += PLAYER_SPEED * cli.dt;
        collected += game.collect_items(player, &player_box);
    }
    let drawn = game.draw_order().len();
    let progress = game.progress();
    info!(
        "level done after {} ticks: {drawn} sprites on screen, {collected} items, coins={} health={}",
        cli.ticks, progress.coins, progress.health
    );

    let unlock = u32::from(collected > 0);
    game.switch_stage(Stage::Overworld { unlock })?;
    if game.is_game_over() {
        info!("game over");
        return Ok(());
    }
    if game.try_move(Direction::Right) {
        for _ in 0..cli.ticks {
            game.advance(cli.dt);
        }
    }
    if let Some(overworld) = game.overworld() {
        info!(
            "overworld: icon on level {} at {:?}, moving={}",
            overworld.current_level(),
            overworld.icon_position(),
            overworld.is_moving()
        );
    }
    info!("final draw list: {} sprites", game.draw_order().len());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
