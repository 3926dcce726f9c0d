//! Back-and-forth linear motion between two endpoints.
//!
//! A [`LinearPatrol`] moves its entity along one axis at constant speed and
//! reflects at the bounds. The reflection snaps exactly onto the bound, so
//! overshoot never accumulates however large `dt` is.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::mapposition::PreviousPosition;
use crate::error::SpriteError;

/// Patrol axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "x", alias = "horizontal")]
    Horizontal,
    #[serde(rename = "y", alias = "vertical")]
    Vertical,
}

impl Axis {
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    fn other(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.y,
            Axis::Vertical => v.x,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::Horizontal => v.x = value,
            Axis::Vertical => v.y = value,
        }
    }
}

/// Patrols always carry a [`PreviousPosition`]; it is refreshed at the start
/// of every step.
#[derive(Component, Debug, Clone, PartialEq)]
#[require(PreviousPosition)]
pub struct LinearPatrol {
    pub start: Vec2,
    pub end: Vec2,
    pub axis: Axis,
    /// `1.0` toward `end`, `-1.0` toward `start`.
    pub direction: f32,
    pub speed: f32,
    /// Mirror the sprite according to the reversed flags.
    pub flip: bool,
    pub reversed_x: bool,
    pub reversed_y: bool,
}

impl LinearPatrol {
    /// Patrol from `start` to `end`, initially heading toward `end`.
    ///
    /// `start` must not lie past `end` on the patrol axis and both points must
    /// share the other coordinate. `start == end` is accepted.
    pub fn new(start: Vec2, end: Vec2, axis: Axis, speed: f32) -> Result<Self, SpriteError> {
        if !start.is_finite() || !end.is_finite() {
            return Err(SpriteError::Configuration(
                "patrol bounds must be finite".into(),
            ));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(SpriteError::Configuration(format!(
                "patrol speed must be a non-negative number, got {speed}"
            )));
        }
        if axis.component(start) > axis.component(end) {
            return Err(SpriteError::Configuration(format!(
                "patrol bounds inverted: start {start} lies past end {end}"
            )));
        }
        if axis.other(start) != axis.other(end) {
            return Err(SpriteError::Configuration(format!(
                "patrol bounds {start} and {end} are not aligned on the {axis:?} axis"
            )));
        }
        let mut patrol = Self {
            start,
            end,
            axis,
            direction: 1.0,
            speed,
            flip: false,
            reversed_x: false,
            reversed_y: false,
        };
        patrol.update_reversed();
        Ok(patrol)
    }

    /// Set the initial heading. Any negative value heads toward `start`.
    pub fn with_direction(mut self, direction: f32) -> Self {
        self.direction = if direction < 0.0 { -1.0 } else { 1.0 };
        self.update_reversed();
        self
    }

    pub fn with_flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    /// Move `pos` by one step and reflect at the bounds. At most one
    /// reflection happens per call.
    pub fn advance(&mut self, pos: Vec2, dt: f32) -> Vec2 {
        let mut pos = pos;
        let lo = self.axis.component(self.start);
        let hi = self.axis.component(self.end);
        let value = self.axis.component(pos) + self.direction * self.speed * dt.max(0.0);
        self.axis.set(&mut pos, value);

        if self.direction > 0.0 && value >= hi {
            self.direction = -1.0;
            self.axis.set(&mut pos, hi);
        } else if self.direction < 0.0 && value <= lo {
            self.direction = 1.0;
            self.axis.set(&mut pos, lo);
        }
        self.update_reversed();
        pos
    }

    fn update_reversed(&mut self) {
        match self.axis {
            Axis::Horizontal => self.reversed_x = self.direction < 0.0,
            // Vertical artwork faces up, so it mirrors while descending.
            Axis::Vertical => self.reversed_y = self.direction > 0.0,
        }
    }
}
