//! Frame-sequence animation component.
//!
//! [`Animation`] is the animation clock shared by every animated entity. The
//! frame index is fractional and grows by `speed * dt` each tick; the shown
//! image is picked from it.
//!
//! Two playback modes exist:
//! - [`Playback::Loop`] wraps the index so the sequence repeats forever.
//! - [`Playback::Once`] plays the sequence a single time. Entities using it
//!   are one-shot effects and get despawned by
//!   [`animation_system`](crate::systems::animation::animation_system) once
//!   the index runs past the last frame.

use std::sync::Arc;

use bevy_ecs::prelude::Component;

use crate::components::sprite::ImageHandle;
use crate::error::SpriteError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Loop,
    Once,
}

#[derive(Debug, Clone, Component)]
pub struct Animation {
    frames: Arc<[ImageHandle]>,
    /// Fractional position inside `frames`. Kept in `[0, len)` while looping.
    pub frame_index: f32,
    /// Frames advanced per second.
    pub speed: f32,
    pub playback: Playback,
}

impl Animation {
    /// Looping animation.
    pub fn new(frames: Arc<[ImageHandle]>, speed: f32) -> Result<Self, SpriteError> {
        Self::with_playback(frames, speed, Playback::Loop)
    }

    /// One-shot animation for particle-like effects.
    pub fn once(frames: Arc<[ImageHandle]>, speed: f32) -> Result<Self, SpriteError> {
        Self::with_playback(frames, speed, Playback::Once)
    }

    fn with_playback(
        frames: Arc<[ImageHandle]>,
        speed: f32,
        playback: Playback,
    ) -> Result<Self, SpriteError> {
        if frames.is_empty() {
            return Err(SpriteError::InvalidState(
                "animation needs at least one frame".into(),
            ));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(SpriteError::Configuration(format!(
                "animation speed must be a non-negative number, got {speed}"
            )));
        }
        Ok(Self {
            frames,
            frame_index: 0.0,
            speed,
            playback,
        })
    }

    pub fn frames(&self) -> &[ImageHandle] {
        &self.frames
    }

    /// True once a [`Playback::Once`] animation has run past its last frame.
    pub fn is_finished(&self) -> bool {
        self.playback == Playback::Once && self.frame_index >= self.frames.len() as f32
    }

    /// Image for the current index, or `None` when a one-shot has finished.
    pub fn current(&self) -> Option<ImageHandle> {
        if self.is_finished() {
            return None;
        }
        let len = self.frames.len();
        let index = (self.frame_index.max(0.0) as usize) % len;
        Some(self.frames[index])
    }

    /// Advance the clock by `dt` seconds and return the image to show.
    ///
    /// Returns `None` only for a finished one-shot, which the caller should
    /// remove.
    pub fn advance(&mut self, dt: f32) -> Option<ImageHandle> {
        self.frame_index += self.speed * dt.max(0.0);
        if self.playback == Playback::Loop {
            self.frame_index = self.frame_index.rem_euclid(self.frames.len() as f32);
        }
        self.current()
    }
}
