use bevy_ecs::prelude::Component;
use glam::Vec2;

/// World-space pivot of an entity. Where the pivot sits on the image is
/// decided by [`Sprite::origin`](super::sprite::Sprite).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

impl From<Vec2> for MapPosition {
    fn from(pos: Vec2) -> Self {
        Self { pos }
    }
}

/// Pivot at the start of the current tick, kept for collision resolution
/// against moving platforms.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct PreviousPosition {
    pub pos: Vec2,
}

impl From<Vec2> for PreviousPosition {
    fn from(pos: Vec2) -> Self {
        Self { pos }
    }
}
