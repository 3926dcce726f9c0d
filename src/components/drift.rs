//! Constant horizontal drift for background clouds.
//!
//! Drifting entities are removed by
//! [`drift_system`](crate::systems::movement::drift_system) once their
//! right edge leaves the screen on the left.

use bevy_ecs::prelude::Component;
use glam::Vec2;

pub const MIN_CLOUD_SPEED: u32 = 50;
pub const MAX_CLOUD_SPEED: u32 = 120;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Drift {
    /// Pixels per second.
    pub speed: f32,
    /// `-1.0` drifts left.
    pub direction: f32,
}

impl Drift {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            direction: -1.0,
        }
    }

    /// Leftward drift at a random whole speed between the cloud limits.
    pub fn random_cloud() -> Self {
        Self::new(fastrand::u32(MIN_CLOUD_SPEED..=MAX_CLOUD_SPEED) as f32)
    }

    pub fn advance(&self, pos: Vec2, dt: f32) -> Vec2 {
        pos + Vec2::new(self.direction * self.speed * dt.max(0.0), 0.0)
    }
}
