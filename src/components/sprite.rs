use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque reference to a decoded image owned by the host renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Sprite is identified by the image it currently shows and its size in world units.
/// The origin selects the pivot point (in pixels) relative to the image's top-left;
/// [`MapPosition`](super::mapposition::MapPosition) is where that pivot lands.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub image: ImageHandle,
    pub size: Vec2,
    pub origin: Vec2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    /// Sprite pivoted on its top-left corner.
    pub fn new(image: ImageHandle, size: Vec2) -> Self {
        Self {
            image,
            size,
            origin: Vec2::ZERO,
            flip_h: false,
            flip_v: false,
        }
    }

    /// Sprite pivoted on its center.
    pub fn centered(image: ImageHandle, size: Vec2) -> Self {
        Self {
            origin: size * 0.5,
            ..Self::new(image, size)
        }
    }

    /// Sprite pivoted on the middle of its bottom edge.
    pub fn mid_bottom(image: ImageHandle, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(size.x * 0.5, size.y),
            ..Self::new(image, size)
        }
    }

    /// Sprite pivoted on the middle of its left edge.
    pub fn mid_left(image: ImageHandle, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(0.0, size.y * 0.5),
            ..Self::new(image, size)
        }
    }

    /// Sprite pivoted on the middle of its top edge.
    pub fn mid_top(image: ImageHandle, size: Vec2) -> Self {
        Self {
            origin: Vec2::new(size.x * 0.5, 0.0),
            ..Self::new(image, size)
        }
    }

    /// Top-left corner for a given pivot position.
    pub fn top_left(&self, pivot: Vec2) -> Vec2 {
        pivot - self.origin
    }
}
