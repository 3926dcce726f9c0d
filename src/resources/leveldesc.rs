//! Pre-parsed level and overworld descriptions.
//!
//! Map parsing happens elsewhere; what reaches the runtime is a list of
//! spawn descriptors per level and a node graph for the overworld. Both are
//! plain serde types so they can be stored as JSON next to the maps.
//!
//! Descriptors are loosely typed on purpose (item kinds are strings, orbit
//! end angles use a sentinel): validation happens when they are spawned, where
//! the error can name the offending descriptor.

use std::path::Path;

use glam::{IVec2, Vec2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::node::{Node, tiles_along};
use crate::components::orbit::FULL_CIRCLE;
use crate::components::patrol::Axis;
use crate::components::waypoint::Direction;
use crate::components::zindex::ZLayer;
use crate::error::{LevelError, SpriteError};

fn full_circle() -> f32 {
    FULL_CIRCLE
}

fn forward() -> f32 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnDescriptor {
    /// Non-animated image, e.g. terrain or decoration.
    Static {
        pos: Vec2,
        image: String,
        #[serde(default)]
        layer: ZLayer,
        #[serde(default)]
        collidable: bool,
    },
    /// Looping animation in place (flags, candles, palms).
    Animated {
        pos: Vec2,
        frames: String,
        #[serde(default)]
        layer: ZLayer,
        #[serde(default)]
        speed: Option<f32>,
        #[serde(default)]
        damage: bool,
    },
    /// Moving platform or saw.
    Patrol {
        start: Vec2,
        end: Vec2,
        axis: Axis,
        speed: f32,
        frames: String,
        #[serde(default = "forward")]
        direction: f32,
        #[serde(default)]
        flip: bool,
        #[serde(default)]
        damage: bool,
    },
    /// Spike ball on a chain.
    Orbit {
        center: Vec2,
        radius: f32,
        speed: f32,
        start_angle: f32,
        #[serde(default = "full_circle")]
        end_angle: f32,
        image: String,
    },
    Item {
        item: String,
        pos: Vec2,
    },
    Cloud {
        pos: Vec2,
        image: String,
    },
}

impl SpawnDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            SpawnDescriptor::Static { .. } => "static",
            SpawnDescriptor::Animated { .. } => "animated",
            SpawnDescriptor::Patrol { .. } => "patrol",
            SpawnDescriptor::Orbit { .. } => "orbit",
            SpawnDescriptor::Item { .. } => "item",
            SpawnDescriptor::Cloud { .. } => "cloud",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(default)]
    pub name: String,
    pub entities: Vec<SpawnDescriptor>,
}

impl LevelDescription {
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverworldDescription {
    pub nodes: Vec<Node>,
    /// Path id to its grid-cell polyline.
    #[serde(default)]
    pub paths: FxHashMap<u32, Vec<IVec2>>,
}

impl OverworldDescription {
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn node(&self, level: u32) -> Option<&Node> {
        self.nodes.iter().find(|n| n.level == level)
    }

    pub fn node_at(&self, grid_pos: IVec2) -> Option<&Node> {
        self.nodes.iter().find(|n| n.grid_pos == grid_pos)
    }

    /// Check the graph before anything is spawned from it.
    ///
    /// Every path must have at least two points and only axis-aligned legs.
    /// Every edge must name an existing path that, walked in the edge's
    /// order, starts on its node and ends on a different one.
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut ids: Vec<u32> = self.paths.keys().copied().collect();
        ids.sort_unstable();
        for path in ids {
            let points = &self.paths[&path];
            if points.len() < 2 {
                return Err(LevelError::Path {
                    path,
                    source: SpriteError::InvalidState(format!(
                        "{} point(s), a path needs at least 2",
                        points.len()
                    )),
                });
            }
            tiles_along(points).map_err(|source| LevelError::Path { path, source })?;
        }

        for node in &self.nodes {
            for direction in Direction::ALL {
                let Some(edge) = node.edges.get(&direction) else {
                    continue;
                };
                let points = self.paths.get(&edge.path).ok_or(LevelError::MissingPath {
                    level: node.level,
                    direction,
                    path: edge.path,
                })?;
                let walk = edge.oriented(points);
                let leaves_node = walk.first() == Some(&node.grid_pos);
                let target = walk.last().and_then(|end| self.node_at(*end));
                if !leaves_node || target.is_none_or(|t| t.level == node.level) {
                    return Err(LevelError::DetachedPath {
                        level: node.level,
                        direction,
                        path: edge.path,
                    });
                }
            }
        }
        Ok(())
    }
}
