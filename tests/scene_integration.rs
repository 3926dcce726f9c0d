//! Scene-level integration tests: level loading, pickups, overworld travel
//! and stage switching.

use std::sync::Arc;

use glam::{IVec2, Vec2};
use rustc_hash::FxHashMap;

use buccaneer::components::boxcollider::BoxCollider;
use buccaneer::components::collectible::CollectibleKind;
use buccaneer::components::group;
use buccaneer::components::sprite::ImageHandle;
use buccaneer::components::waypoint::{Direction, DirectionalFrames};
use buccaneer::components::zindex::ZLayer;
use buccaneer::error::{LevelError, SpriteError};
use buccaneer::game::{Game, Scene, Stage};
use buccaneer::level::LevelScene;
use buccaneer::overworld::OverworldScene;
use buccaneer::resources::gameconfig::GameConfig;
use buccaneer::resources::imagestore::ImageStore;
use buccaneer::resources::leveldesc::{LevelDescription, OverworldDescription};
use buccaneer::resources::progress::Progress;

fn seq(first: u32, n: u32) -> Arc<[ImageHandle]> {
    (first..first + n).map(ImageHandle).collect()
}

fn images() -> ImageStore {
    let mut store = ImageStore::new();
    store.insert_image("terrain", ImageHandle(1));
    store.insert_image("spike", ImageHandle(2));
    store.insert_image("path", ImageHandle(3));
    store.insert_image("node", ImageHandle(4));
    store.insert_frames("saw", seq(10, 2));
    store.insert_frames("particle", seq(20, 5));
    for (i, kind) in CollectibleKind::ALL.into_iter().enumerate() {
        let key = format!("items/{kind}");
        store.insert_frames(key.clone(), seq(100 + 10 * i as u32, 4));
        store.set_size(key, Vec2::new(32.0, 32.0));
    }
    store.insert_directional(
        "icon",
        DirectionalFrames {
            idle: seq(200, 2),
            up: seq(210, 2),
            down: seq(220, 2),
            left: seq(230, 2),
            right: seq(240, 2),
        },
    );
    store
}

fn level_desc() -> LevelDescription {
    LevelDescription::from_json(
        r#"{
            "name": "test cove",
            "entities": [
                {"kind": "static", "pos": [0, 400], "image": "terrain", "layer": "terrain", "collidable": true},
                {"kind": "patrol", "start": [0, 200], "end": [300, 200], "axis": "x", "speed": 100, "frames": "saw", "damage": true},
                {"kind": "orbit", "center": [500, 200], "radius": 60, "speed": 90, "start_angle": 0, "image": "spike"},
                {"kind": "item", "item": "gold", "pos": [100, 100]},
                {"kind": "item", "item": "potion", "pos": [300, 100]}
            ]
        }"#,
    )
    .unwrap()
}

fn overworld_desc() -> OverworldDescription {
    OverworldDescription::from_json(
        r#"{
            "nodes": [
                {"level": 0, "grid_pos": [2, 2], "edges": {"right": {"path": 1}}},
                {"level": 1, "grid_pos": [6, 2], "edges": {"left": {"path": 1, "reverse": true}}}
            ],
            "paths": {"1": [[2, 2], [6, 2]]}
        }"#,
    )
    .unwrap()
}

fn player_box() -> BoxCollider {
    BoxCollider::new(20.0, 20.0).with_offset(Vec2::new(-10.0, -10.0))
}

#[test]
fn level_spawns_every_descriptor() {
    let mut scene =
        LevelScene::from_description(0, &level_desc(), &images(), &GameConfig::new()).unwrap();
    let registry = scene.registry_mut();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.count_group(group::ITEMS), 2);
    assert_eq!(registry.count_group(group::DAMAGE), 2);
    assert_eq!(registry.count_group(group::COLLIDABLE), 1);
    assert_eq!(scene.draw_order()[0].layer, ZLayer::Terrain);
}

#[test]
fn invalid_descriptor_is_named_in_the_error() {
    let desc = LevelDescription::from_json(
        r#"{"entities": [
            {"kind": "static", "pos": [0, 0], "image": "terrain"},
            {"kind": "patrol", "start": [300, 0], "end": [0, 0], "axis": "x", "speed": 10, "frames": "saw"}
        ]}"#,
    )
    .unwrap();
    let err = match LevelScene::from_description(3, &desc, &images(), &GameConfig::new()) {
        Ok(_) => panic!("inverted patrol bounds should fail"),
        Err(e) => e,
    };
    assert!(matches!(
        err,
        LevelError::Entity {
            index: 1,
            kind: "patrol",
            source: SpriteError::Configuration(_)
        }
    ));
    assert!(err.to_string().starts_with("entity #1 (patrol)"));
}

#[test]
fn unknown_item_kind_is_rejected() {
    let desc = LevelDescription::from_json(
        r#"{"entities": [{"kind": "item", "item": "emerald", "pos": [0, 0]}]}"#,
    )
    .unwrap();
    let result = LevelScene::from_description(0, &desc, &images(), &GameConfig::new());
    assert!(matches!(
        result,
        Err(LevelError::Entity {
            index: 0,
            kind: "item",
            source: SpriteError::Configuration(_)
        })
    ));
}

#[test]
fn missing_image_is_reported_with_its_key() {
    let desc = LevelDescription::from_json(
        r#"{"entities": [{"kind": "cloud", "pos": [0, 0], "image": "ghost"}]}"#,
    )
    .unwrap();
    match LevelScene::from_description(0, &desc, &images(), &GameConfig::new()) {
        Err(LevelError::MissingImage { index, kind, key }) => {
            assert_eq!(index, 0);
            assert_eq!(kind, "cloud");
            assert_eq!(key, "ghost");
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("missing image should fail"),
    }
}

#[test]
fn collecting_applies_effect_and_leaves_a_particle() {
    let mut scene =
        LevelScene::from_description(0, &level_desc(), &images(), &GameConfig::new()).unwrap();
    let mut progress = Progress::default();
    let coins = progress.coins;

    let got = scene.collect_items(Vec2::new(100.0, 100.0), &player_box(), &mut progress);
    assert_eq!(got, 1);
    assert_eq!(progress.coins, coins + 5);
    assert_eq!(scene.registry().count_group(group::ITEMS), 1);
    let particles: Vec<_> = scene
        .draw_order()
        .into_iter()
        .filter(|d| d.layer == ZLayer::Foreground)
        .collect();
    assert_eq!(particles.len(), 1);
    assert_eq!(particles[0].image, ImageHandle(20));

    // The item is gone, so a second overlap does nothing.
    let again = scene.collect_items(Vec2::new(100.0, 100.0), &player_box(), &mut progress);
    assert_eq!(again, 0);
    assert_eq!(progress.coins, coins + 5);

    // Five frames at six per second have run out after one second.
    scene.advance(1.0);
    assert!(
        scene
            .draw_order()
            .iter()
            .all(|d| d.layer != ZLayer::Foreground)
    );
}

#[test]
fn potion_restores_health() {
    let mut scene =
        LevelScene::from_description(0, &level_desc(), &images(), &GameConfig::new()).unwrap();
    let mut progress = Progress {
        health: 2,
        ..Progress::default()
    };
    let got = scene.collect_items(Vec2::new(300.0, 100.0), &player_box(), &mut progress);
    assert_eq!(got, 1);
    assert_eq!(progress.health, 3);
}

#[test]
fn overworld_move_is_gated_by_unlocked_level() {
    let progress = Progress::default();
    let mut scene =
        OverworldScene::from_description(&overworld_desc(), &images(), &GameConfig::new(), &progress)
            .unwrap();
    assert_eq!(scene.icon_position(), Some(Vec2::new(160.0, 160.0)));
    assert!(!scene.try_move(Direction::Right, &progress));
    assert!(!scene.try_move(Direction::Up, &progress));
    assert!(!scene.is_moving());
}

#[test]
fn overworld_icon_walks_to_the_next_node() {
    let mut progress = Progress {
        unlocked_level: 1,
        ..Progress::default()
    };
    let mut scene =
        OverworldScene::from_description(&overworld_desc(), &images(), &GameConfig::new(), &progress)
            .unwrap();

    assert!(scene.try_move(Direction::Right, &progress));
    assert!(scene.is_moving());
    assert!(!scene.try_move(Direction::Right, &progress));
    assert_eq!(scene.select_level(&mut progress), None);

    // 256px at 400px/s: three steps travel, the fourth snaps onto the node.
    for _ in 0..4 {
        scene.advance(0.25);
    }
    assert!(!scene.is_moving());
    assert_eq!(scene.current_level(), 1);
    assert_eq!(scene.icon_position(), Some(Vec2::new(416.0, 160.0)));

    assert_eq!(scene.select_level(&mut progress), Some(1));
    assert_eq!(progress.current_level, 1);

    assert!(scene.try_move(Direction::Left, &progress));
    for _ in 0..4 {
        scene.advance(0.25);
    }
    assert_eq!(scene.current_level(), 0);
    assert_eq!(scene.icon_position(), Some(Vec2::new(160.0, 160.0)));
}

#[test]
fn overworld_draws_icon_over_paths() {
    let progress = Progress::default();
    let mut scene =
        OverworldScene::from_description(&overworld_desc(), &images(), &GameConfig::new(), &progress)
            .unwrap();
    let order = scene.draw_order();
    // Five path tiles, two nodes, one icon.
    assert_eq!(order.len(), 8);
    assert_eq!(order.last().map(|d| d.entity), Some(scene.icon()));
    assert_eq!(scene.registry().count_group(group::NODES), 2);
}

#[test]
fn overworld_without_start_node_fails() {
    let progress = Progress {
        current_level: 9,
        ..Progress::default()
    };
    let result =
        OverworldScene::from_description(&overworld_desc(), &images(), &GameConfig::new(), &progress);
    assert!(matches!(result, Err(LevelError::MissingNode(9))));
}

fn new_game() -> Game {
    let mut levels = FxHashMap::default();
    levels.insert(0, level_desc());
    Game::new(GameConfig::new(), images(), levels, overworld_desc()).unwrap()
}

#[test]
fn game_starts_on_overworld_and_enters_level() {
    let mut game = new_game();
    assert!(matches!(game.scene(), Scene::Overworld(_)));
    assert!(game.enter_selected_level().unwrap());
    assert!(matches!(game.scene(), Scene::Level(_)));
    assert_eq!(game.level().map(|l| l.level()), Some(0));
}

#[test]
fn returning_to_overworld_settles_the_level() {
    let mut game = new_game();
    let health = game.progress().health;

    game.switch_stage(Stage::Level).unwrap();
    game.switch_stage(Stage::Overworld { unlock: 0 }).unwrap();
    assert_eq!(game.progress().health, health - 1);
    assert_eq!(game.progress().unlocked_level, 0);

    game.switch_stage(Stage::Level).unwrap();
    game.switch_stage(Stage::Overworld { unlock: 1 }).unwrap();
    assert_eq!(game.progress().health, health - 1);
    assert_eq!(game.progress().unlocked_level, 6);
    assert!(game.try_move(Direction::Right));
}

#[test]
fn progress_survives_level_restart() {
    let mut game = new_game();
    game.switch_stage(Stage::Level).unwrap();
    assert_eq!(game.collect_items(Vec2::new(100.0, 100.0), &player_box()), 1);
    let coins = game.progress().coins;

    game.restart_level().unwrap();
    let items = game
        .level()
        .map(|l| l.registry_mut().count_group(group::ITEMS));
    assert_eq!(items, Some(2));
    assert_eq!(game.progress().coins, coins);
}

#[test]
fn missing_level_is_an_error() {
    let mut game = new_game();
    game.progress_mut().current_level = 4;
    assert!(matches!(
        game.switch_stage(Stage::Level),
        Err(LevelError::MissingLevel(4))
    ));
    assert!(matches!(game.scene(), Scene::Overworld(_)));
}

#[test]
fn repeated_failures_end_the_game() {
    let mut game = new_game();
    let health = game.progress().health;
    for _ in 0..health {
        assert!(!game.is_game_over());
        game.switch_stage(Stage::Overworld { unlock: 0 }).unwrap();
    }
    assert!(game.is_game_over());
}

#[test]
fn path_tiles_cover_the_polyline() {
    let desc = overworld_desc();
    assert_eq!(desc.paths[&1], vec![IVec2::new(2, 2), IVec2::new(6, 2)]);
    let progress = Progress::default();
    let scene =
        OverworldScene::from_description(&desc, &images(), &GameConfig::new(), &progress).unwrap();
    assert_eq!(scene.registry().count_group(group::PATHABLE), 5);
}

fn overworld_with(paths: &str, edges: &str) -> Result<OverworldScene, LevelError> {
    let desc = OverworldDescription::from_json(&format!(
        r#"{{
            "nodes": [
                {{"level": 0, "grid_pos": [1, 1], "edges": {edges}}},
                {{"level": 1, "grid_pos": [4, 3]}}
            ],
            "paths": {paths}
        }}"#
    ))
    .unwrap();
    OverworldScene::from_description(&desc, &images(), &GameConfig::new(), &Progress::default())
}

#[test]
fn diagonal_overworld_path_fails_to_load() {
    let result = overworld_with(r#"{"1": [[1, 1], [4, 3]]}"#, r#"{"right": {"path": 1}}"#);
    assert!(matches!(
        result,
        Err(LevelError::Path {
            path: 1,
            source: SpriteError::InvalidState(_)
        })
    ));
}

#[test]
fn edge_to_unknown_path_fails_to_load() {
    let result = overworld_with(
        r#"{"1": [[1, 1], [4, 1], [4, 3]]}"#,
        r#"{"right": {"path": 1}, "down": {"path": 9}}"#,
    );
    assert!(matches!(
        result,
        Err(LevelError::MissingPath {
            level: 0,
            direction: Direction::Down,
            path: 9
        })
    ));
}

#[test]
fn path_that_stops_short_of_a_node_fails_to_load() {
    let result = overworld_with(r#"{"1": [[1, 1], [4, 1]]}"#, r#"{"right": {"path": 1}}"#);
    match result {
        Err(err @ LevelError::DetachedPath { level: 0, path: 1, .. }) => {
            assert!(err.to_string().contains("path 1"));
        }
        Err(other) => panic!("unexpected error {other}"),
        Ok(_) => panic!("path ending between nodes should fail"),
    }
}

#[test]
fn bent_path_between_nodes_loads_every_tile() {
    let scene = overworld_with(r#"{"1": [[1, 1], [4, 1], [4, 3]]}"#, r#"{"right": {"path": 1}}"#)
        .unwrap();
    // Four tiles along the top, two more down to the node.
    assert_eq!(scene.registry().count_group(group::PATHABLE), 6);
}

#[test]
fn patrols_are_anchored_on_their_leading_edge() {
    let desc = LevelDescription::from_json(
        r#"{"entities": [
            {"kind": "patrol", "start": [0, 200], "end": [300, 200], "axis": "x", "speed": 10, "frames": "saw"},
            {"kind": "patrol", "start": [500, 100], "end": [500, 300], "axis": "y", "speed": 10, "frames": "saw"}
        ]}"#,
    )
    .unwrap();
    let mut scene = LevelScene::from_description(0, &desc, &images(), &GameConfig::new()).unwrap();
    let order = scene.draw_order();
    assert_eq!(order[0].position, Vec2::new(0.0, 168.0));
    assert_eq!(order[1].position, Vec2::new(468.0, 100.0));
}
