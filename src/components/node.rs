//! Overworld graph nodes.
//!
//! Each [`Node`] stands on a level entrance. Its edges point at shared paths
//! by id; a path id doubles as the level it leads toward, so an edge is only
//! usable once that level is unlocked.

use arrayvec::ArrayVec;
use bevy_ecs::prelude::Component;
use glam::{IVec2, Vec2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::waypoint::Direction;
use crate::error::SpriteError;
use crate::resources::progress::Progress;

/// Reference from a node to one of the overworld paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRef {
    pub path: u32,
    /// Walk the path's points back to front.
    #[serde(default)]
    pub reverse: bool,
}

impl PathRef {
    /// The path's points in walking order.
    pub fn oriented(&self, points: &[IVec2]) -> Vec<IVec2> {
        let mut points = points.to_vec();
        if self.reverse {
            points.reverse();
        }
        points
    }
}

#[derive(Component, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub level: u32,
    pub grid_pos: IVec2,
    #[serde(default)]
    pub edges: FxHashMap<Direction, PathRef>,
}

impl Node {
    /// An edge exists in `direction` and the level it leads toward is unlocked.
    pub fn can_move(&self, direction: Direction, progress: &Progress) -> bool {
        self.edges
            .get(&direction)
            .is_some_and(|edge| edge.path <= progress.unlocked_level)
    }

    pub fn available_directions(&self, progress: &Progress) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|d| self.can_move(*d, progress))
            .collect()
    }

    /// World position of the node: the center of its tile.
    pub fn center(&self, tile_size: f32) -> Vec2 {
        tile_center(self.grid_pos, tile_size)
    }
}

/// Tile on an overworld path, tagged with the path it belongs to.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathTile {
    pub path: u32,
}

pub fn tile_center(grid: IVec2, tile_size: f32) -> Vec2 {
    grid.as_vec2() * tile_size + Vec2::splat(tile_size * 0.5)
}

/// Every grid cell covered by an axis-aligned polyline, corners included
/// once.
pub fn tiles_along(points: &[IVec2]) -> Result<Vec<IVec2>, SpriteError> {
    let mut tiles: Vec<IVec2> = Vec::new();
    if let Some(first) = points.first() {
        tiles.push(*first);
    }
    for leg in points.windows(2) {
        let (a, b) = (leg[0], leg[1]);
        if a.x != b.x && a.y != b.y {
            return Err(SpriteError::InvalidState(format!(
                "diagonal leg from {a} to {b}"
            )));
        }
        let step = (b - a).signum();
        let mut cell = a;
        while cell != b {
            cell += step;
            tiles.push(cell);
        }
    }
    Ok(tiles)
}
