//! Draw-list extraction.
//!
//! Rendering itself belongs to the host. [`draw_list`] queries every entity
//! with a sprite, position and layer and returns them in paint order: by
//! [`ZLayer`] first, then by [`SpawnOrder`] so entities inside a layer keep
//! the order they were added in.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::mapposition::MapPosition;
use crate::components::sprite::{ImageHandle, Sprite};
use crate::components::zindex::{SpawnOrder, ZLayer};

/// What the host needs to paint one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub entity: Entity,
    pub image: ImageHandle,
    /// Top-left corner in world space.
    pub position: Vec2,
    pub layer: ZLayer,
    pub flip_h: bool,
    pub flip_v: bool,
}

pub fn draw_list(world: &mut World) -> Vec<DrawItem> {
    let mut q = world.query::<(Entity, &Sprite, &MapPosition, &ZLayer, &SpawnOrder)>();
    let mut to_draw: Vec<(SpawnOrder, DrawItem)> = q
        .iter(world)
        .map(|(entity, sprite, pos, layer, order)| {
            (
                *order,
                DrawItem {
                    entity,
                    image: sprite.image,
                    position: sprite.top_left(pos.pos),
                    layer: *layer,
                    flip_h: sprite.flip_h,
                    flip_v: sprite.flip_v,
                },
            )
        })
        .collect();

    to_draw.sort_by_key(|(order, item)| (item.layer, *order));
    to_draw.into_iter().map(|(_, item)| item).collect()
}
