//! Image handle registry.
//!
//! The host decodes images and hands the runtime opaque [`ImageHandle`]s
//! grouped under semantic keys (`"saw"`, `"items/gold"`, `"particle"`). Single
//! images, frame sequences and the per-direction icon sets live in separate
//! maps. Sizes are optional; spawners fall back to one tile.

use std::sync::Arc;

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::components::sprite::ImageHandle;
use crate::components::waypoint::DirectionalFrames;

#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: FxHashMap<String, ImageHandle>,
    sequences: FxHashMap<String, Arc<[ImageHandle]>>,
    directional: FxHashMap<String, DirectionalFrames>,
    sizes: FxHashMap<String, Vec2>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_image(&mut self, key: impl Into<String>, image: ImageHandle) {
        self.images.insert(key.into(), image);
    }

    pub fn insert_frames(&mut self, key: impl Into<String>, frames: impl Into<Arc<[ImageHandle]>>) {
        self.sequences.insert(key.into(), frames.into());
    }

    pub fn insert_directional(&mut self, key: impl Into<String>, frames: DirectionalFrames) {
        self.directional.insert(key.into(), frames);
    }

    pub fn set_size(&mut self, key: impl Into<String>, size: Vec2) {
        self.sizes.insert(key.into(), size);
    }

    /// Single image. Falls back to the first frame of a sequence with the
    /// same key.
    pub fn image(&self, key: &str) -> Option<ImageHandle> {
        self.images
            .get(key)
            .copied()
            .or_else(|| self.sequences.get(key).and_then(|f| f.first().copied()))
    }

    pub fn frames(&self, key: &str) -> Option<Arc<[ImageHandle]>> {
        self.sequences.get(key).cloned()
    }

    pub fn directional(&self, key: &str) -> Option<&DirectionalFrames> {
        self.directional.get(key)
    }

    pub fn size_or(&self, key: &str, fallback: Vec2) -> Vec2 {
        self.sizes.get(key).copied().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_falls_back_to_first_frame() {
        let mut store = ImageStore::new();
        store.insert_frames("saw", vec![ImageHandle(7), ImageHandle(8)]);
        assert_eq!(store.image("saw"), Some(ImageHandle(7)));
        assert_eq!(store.image("missing"), None);
    }

    #[test]
    fn size_falls_back() {
        let mut store = ImageStore::new();
        store.set_size("boat", Vec2::new(128.0, 32.0));
        assert_eq!(store.size_or("boat", Vec2::ONE), Vec2::new(128.0, 32.0));
        assert_eq!(store.size_or("palm", Vec2::ONE), Vec2::ONE);
    }
}
