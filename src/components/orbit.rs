//! Circular motion around a fixed center.
//!
//! The position is recomputed from the current angle every tick instead of
//! being integrated, so an orbiting entity never drifts off its circle.
//! Angles are in degrees with 0 on the +x axis.

use bevy_ecs::prelude::Component;
use glam::Vec2;

use crate::error::SpriteError;

/// End angle used by level descriptions to mean "full revolution".
pub const FULL_CIRCLE: f32 = -1.0;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Orbit {
    pub center: Vec2,
    pub radius: f32,
    /// Degrees per second.
    pub speed: f32,
    pub start_angle: f32,
    /// `None` for an unbounded orbit.
    pub end_angle: Option<f32>,
    pub angle: f32,
    pub direction: f32,
}

impl Orbit {
    pub fn new(
        center: Vec2,
        radius: f32,
        speed: f32,
        start_angle: f32,
        end_angle: Option<f32>,
    ) -> Result<Self, SpriteError> {
        if !center.is_finite() || !start_angle.is_finite() {
            return Err(SpriteError::Configuration(
                "orbit center and start angle must be finite".into(),
            ));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(SpriteError::Configuration(format!(
                "orbit radius must be a non-negative number, got {radius}"
            )));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(SpriteError::Configuration(format!(
                "orbit speed must be a non-negative number, got {speed}"
            )));
        }
        if let Some(end) = end_angle {
            if !end.is_finite() || end < start_angle {
                return Err(SpriteError::Configuration(format!(
                    "orbit angle range inverted: start {start_angle} > end {end}"
                )));
            }
        }
        Ok(Self {
            center,
            radius,
            speed,
            start_angle,
            end_angle,
            angle: start_angle,
            direction: 1.0,
        })
    }

    /// Build from the level-description form where [`FULL_CIRCLE`] marks an
    /// unbounded orbit.
    pub fn from_sentinel(
        center: Vec2,
        radius: f32,
        speed: f32,
        start_angle: f32,
        end_angle: f32,
    ) -> Result<Self, SpriteError> {
        let end = (end_angle != FULL_CIRCLE).then_some(end_angle);
        Self::new(center, radius, speed, start_angle, end)
    }

    pub fn is_bounded(&self) -> bool {
        self.end_angle.is_some()
    }

    pub fn position(&self) -> Vec2 {
        let rad = self.angle.to_radians();
        self.center + Vec2::new(rad.cos(), rad.sin()) * self.radius
    }

    /// Step the angle and return the new position.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let step = self.speed * dt.max(0.0);
        match self.end_angle {
            Some(end) => {
                self.angle += self.direction * step;
                if self.direction > 0.0 && self.angle >= end {
                    self.angle = end;
                    self.direction = -1.0;
                } else if self.direction < 0.0 && self.angle <= self.start_angle {
                    self.angle = self.start_angle;
                    self.direction = 1.0;
                }
            }
            None => {
                self.angle = (self.angle + step).rem_euclid(360.0);
            }
        }
        self.position()
    }
}
