//! Level-select overworld.
//!
//! The overworld is a registry holding path tiles, one entity per [`Node`]
//! and the player icon. The icon only moves along whole paths: a move is
//! accepted while it is idle, and the node at the far end becomes current
//! once it stops there.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::group::{self, Groups};
use crate::components::mapposition::MapPosition;
use crate::components::node::{Node, PathTile, tile_center, tiles_along};
use crate::components::sprite::Sprite;
use crate::components::waypoint::{Direction, IconAnimation, IconState, WaypointFollower};
use crate::components::zindex::ZLayer;
use crate::error::LevelError;
use crate::registry::EntityRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::ImageStore;
use crate::resources::leveldesc::OverworldDescription;
use crate::resources::progress::Progress;
use crate::systems::render::DrawItem;

pub const PATH_KEY: &str = "path";
pub const NODE_KEY: &str = "node";
pub const ICON_KEY: &str = "icon";

pub struct OverworldScene {
    desc: OverworldDescription,
    registry: EntityRegistry,
    icon: Entity,
    tile_size: f32,
    current_level: u32,
    destination: Option<u32>,
}

impl OverworldScene {
    /// Build the overworld with the icon standing on the node of
    /// `progress.current_level`. The graph is validated first, so a broken
    /// path or edge fails here rather than on the first move.
    pub fn from_description(
        desc: &OverworldDescription,
        images: &ImageStore,
        config: &GameConfig,
        progress: &Progress,
    ) -> Result<Self, LevelError> {
        desc.validate()?;
        let tile_size = config.tile_size;
        let tile = Vec2::splat(tile_size);
        let start = desc
            .node(progress.current_level)
            .ok_or(LevelError::MissingNode(progress.current_level))?;
        let mut registry = EntityRegistry::new();

        let path_image = images
            .image(PATH_KEY)
            .ok_or_else(|| LevelError::UnknownImage(PATH_KEY.to_string()))?;
        let mut path_ids: Vec<u32> = desc.paths.keys().copied().collect();
        path_ids.sort_unstable();
        for id in path_ids {
            let cells = tiles_along(&desc.paths[&id])
                .map_err(|source| LevelError::Path { path: id, source })?;
            for cell in cells {
                registry.spawn(
                    (
                        MapPosition::from(tile_center(cell, tile_size)),
                        Sprite::centered(path_image, tile),
                        PathTile { path: id },
                        ZLayer::Terrain,
                    ),
                    Groups::new().with(group::PATHABLE),
                );
            }
        }

        let node_image = images
            .image(NODE_KEY)
            .ok_or_else(|| LevelError::UnknownImage(NODE_KEY.to_string()))?;
        for node in &desc.nodes {
            registry.spawn(
                (
                    MapPosition::from(node.center(tile_size)),
                    Sprite::centered(node_image, images.size_or(NODE_KEY, tile)),
                    node.clone(),
                    ZLayer::Terrain,
                ),
                Groups::new().with(group::NODES),
            );
        }

        let frames = images
            .directional(ICON_KEY)
            .cloned()
            .ok_or_else(|| LevelError::UnknownImage(ICON_KEY.to_string()))?;
        let anim = IconAnimation::new(frames, config.animation_speed).map_err(LevelError::Icon)?;
        let follower = WaypointFollower::new(config.icon_speed).map_err(LevelError::Icon)?;
        let sprite = Sprite::centered(
            anim.current(IconState::Idle),
            images.size_or(ICON_KEY, tile),
        );
        let icon = registry.spawn(
            (
                MapPosition::from(start.center(tile_size)),
                sprite,
                anim,
                follower,
                ZLayer::Main,
            ),
            Groups::new(),
        );

        info!(
            "overworld loaded: {} nodes, {} paths, icon on level {}",
            desc.nodes.len(),
            desc.paths.len(),
            progress.current_level
        );
        Ok(Self {
            desc: desc.clone(),
            registry,
            icon,
            tile_size,
            current_level: progress.current_level,
            destination: None,
        })
    }

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    pub fn current_node(&self) -> Option<&Node> {
        self.desc.node(self.current_level)
    }

    pub fn icon(&self) -> Entity {
        self.icon
    }

    pub fn icon_position(&self) -> Option<Vec2> {
        self.registry.position(self.icon)
    }

    pub fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    /// Send the icon along the path leaving the current node in `direction`.
    ///
    /// Ignored while the icon is moving or when the path is still locked.
    pub fn try_move(&mut self, direction: Direction, progress: &Progress) -> bool {
        if self.is_moving() {
            return false;
        }
        let Some(node) = self.desc.node(self.current_level) else {
            return false;
        };
        if !node.can_move(direction, progress) {
            return false;
        }
        let Some(edge) = node.edges.get(&direction).copied() else {
            return false;
        };
        let Some(grid) = self.desc.paths.get(&edge.path).map(|p| edge.oriented(p)) else {
            return false;
        };
        let Some(target) = grid
            .last()
            .and_then(|end| self.desc.node_at(*end))
            .map(|n| n.level)
        else {
            return false;
        };
        let points: Vec<Vec2> = grid
            .iter()
            .map(|cell| tile_center(*cell, self.tile_size))
            .collect();

        let Some(mut pos) = self.registry.position(self.icon) else {
            return false;
        };
        let started = match self.registry.get_mut::<WaypointFollower>(self.icon) {
            Some(mut follower) => follower.start_path(&mut pos, &points),
            None => return false,
        };
        if let Err(e) = started {
            warn!("overworld path {}: {e}", edge.path);
            return false;
        }
        if let Some(mut position) = self.registry.get_mut::<MapPosition>(self.icon) {
            position.pos = pos;
        }
        debug!(
            "icon leaves level {} {direction:?} toward level {target}",
            self.current_level
        );
        self.destination = Some(target);
        true
    }

    pub fn advance(&mut self, dt: f32) {
        self.registry.advance(dt);
        let idle = self
            .registry
            .get::<WaypointFollower>(self.icon)
            .is_some_and(WaypointFollower::is_idle);
        if idle {
            if let Some(level) = self.destination.take() {
                debug!("icon arrived at level {level}");
                self.current_level = level;
            }
        }
    }

    /// Pick the level under the icon. Returns `None` while it is moving.
    pub fn select_level(&self, progress: &mut Progress) -> Option<u32> {
        if self.is_moving() {
            return None;
        }
        progress.current_level = self.current_level;
        Some(self.current_level)
    }

    pub fn draw_order(&mut self) -> Vec<DrawItem> {
        self.registry.draw_order()
    }
}
