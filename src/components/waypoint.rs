//! Waypoint path following for the overworld icon.
//!
//! A [`WaypointFollower`] walks an axis-aligned polyline one leg at a time.
//! Each tick it first checks whether the next waypoint has been reached or
//! passed along the current heading. If so it snaps onto it, drops it from
//! the path and turns toward the following one. Only then does it move.
//!
//! Distance left over after snapping is dropped: the step taken in the same
//! tick is a full `speed * dt` along the new heading, measured from the
//! waypoint.
//!
//! [`IconAnimation`] picks a frame sequence from the follower's
//! [`IconState`] and animates it every tick, moving or not.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::sprite::ImageHandle;
use crate::error::SpriteError;

/// Screen direction. `Down` is +y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn vector(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Presentation state derived from the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IconState {
    #[default]
    Idle,
    Up,
    Down,
    Left,
    Right,
}

impl IconState {
    pub fn from_heading(heading: Vec2) -> Self {
        if heading == Direction::Right.vector() {
            IconState::Right
        } else if heading == Direction::Left.vector() {
            IconState::Left
        } else if heading == Direction::Down.vector() {
            IconState::Down
        } else if heading == Direction::Up.vector() {
            IconState::Up
        } else {
            IconState::Idle
        }
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct WaypointFollower {
    path: VecDeque<Vec2>,
    heading: Vec2,
    pub speed: f32,
}

impl WaypointFollower {
    pub fn new(speed: f32) -> Result<Self, SpriteError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(SpriteError::Configuration(format!(
                "waypoint speed must be a non-negative number, got {speed}"
            )));
        }
        Ok(Self {
            path: VecDeque::new(),
            heading: Vec2::ZERO,
            speed,
        })
    }

    /// Teleport `pos` onto the first point and queue the rest.
    ///
    /// Consecutive points must share an x or a y coordinate; a diagonal leg
    /// is rejected and leaves the follower untouched. An empty slice clears
    /// the path without moving.
    pub fn start_path(&mut self, pos: &mut Vec2, points: &[Vec2]) -> Result<(), SpriteError> {
        if let Some(leg) = points
            .windows(2)
            .find(|leg| leg[0].x != leg[1].x && leg[0].y != leg[1].y)
        {
            return Err(SpriteError::InvalidState(format!(
                "diagonal waypoint leg from {} to {}",
                leg[0], leg[1]
            )));
        }
        self.path.clear();
        if let Some((first, rest)) = points.split_first() {
            *pos = *first;
            self.path.extend(rest.iter().copied());
        }
        self.heading = self.heading_from(*pos);
        Ok(())
    }

    /// Advance along the path and return the new position.
    pub fn advance(&mut self, pos: Vec2, dt: f32) -> Vec2 {
        let Some(&next) = self.path.front() else {
            return pos;
        };
        let mut pos = pos;
        if self.reached(pos, next) {
            pos = next;
            self.path.pop_front();
            self.heading = self.heading_from(pos);
        }
        pos + self.heading * self.speed * dt.max(0.0)
    }

    pub fn state(&self) -> IconState {
        IconState::from_heading(self.heading)
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn remaining(&self) -> &VecDeque<Vec2> {
        &self.path
    }

    pub fn is_idle(&self) -> bool {
        self.path.is_empty()
    }

    fn reached(&self, pos: Vec2, next: Vec2) -> bool {
        (self.heading.y > 0.0 && pos.y >= next.y)
            || (self.heading.y < 0.0 && pos.y <= next.y)
            || (self.heading.x > 0.0 && pos.x >= next.x)
            || (self.heading.x < 0.0 && pos.x <= next.x)
    }

    fn heading_from(&self, pos: Vec2) -> Vec2 {
        match self.path.front() {
            None => Vec2::ZERO,
            Some(next) if next.x == pos.x => {
                Vec2::new(0.0, if next.y > pos.y { 1.0 } else { -1.0 })
            }
            Some(next) => Vec2::new(if next.x > pos.x { 1.0 } else { -1.0 }, 0.0),
        }
    }
}

/// One frame sequence per [`IconState`].
#[derive(Debug, Clone)]
pub struct DirectionalFrames {
    pub idle: Arc<[ImageHandle]>,
    pub up: Arc<[ImageHandle]>,
    pub down: Arc<[ImageHandle]>,
    pub left: Arc<[ImageHandle]>,
    pub right: Arc<[ImageHandle]>,
}

impl DirectionalFrames {
    pub fn get(&self, state: IconState) -> &[ImageHandle] {
        match state {
            IconState::Idle => &self.idle,
            IconState::Up => &self.up,
            IconState::Down => &self.down,
            IconState::Left => &self.left,
            IconState::Right => &self.right,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct IconAnimation {
    frames: DirectionalFrames,
    pub frame_index: f32,
    pub speed: f32,
}

impl IconAnimation {
    pub fn new(frames: DirectionalFrames, speed: f32) -> Result<Self, SpriteError> {
        let states = [
            IconState::Idle,
            IconState::Up,
            IconState::Down,
            IconState::Left,
            IconState::Right,
        ];
        if let Some(state) = states.iter().find(|s| frames.get(**s).is_empty()) {
            return Err(SpriteError::InvalidState(format!(
                "icon has no frames for state {state:?}"
            )));
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
        })
    }

    pub fn current(&self, state: IconState) -> ImageHandle {
        let frames = self.frames.get(state);
        frames[(self.frame_index as usize) % frames.len()]
    }

    pub fn advance(&mut self, state: IconState, dt: f32) -> ImageHandle {
        let len = self.frames.get(state).len() as f32;
        self.frame_index = (self.frame_index + self.speed * dt.max(0.0)).rem_euclid(len);
        self.current(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn follower() -> WaypointFollower {
        WaypointFollower::new(100.0).unwrap()
    }

    #[test]
    fn walks_every_leg_and_ends_exactly_on_last_point() {
        let mut f = follower();
        let mut pos = Vec2::new(-5.0, -5.0);
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.0, 130.0),
            Vec2::new(-70.0, 130.0),
        ];
        f.start_path(&mut pos, &points).unwrap();
        assert_eq!(pos, points[0]);
        assert_eq!(f.state(), IconState::Down);

        for _ in 0..100 {
            pos = f.advance(pos, 0.1);
        }
        assert_eq!(pos, points[2]);
        assert!(f.remaining().is_empty());
        assert_eq!(f.state(), IconState::Idle);
    }

    #[test]
    fn turns_at_waypoint() {
        let mut f = follower();
        let mut pos = Vec2::ZERO;
        f.start_path(
            &mut pos,
            &[Vec2::ZERO, Vec2::new(50.0, 0.0), Vec2::new(50.0, -50.0)],
        )
        .unwrap();
        assert_eq!(f.state(), IconState::Right);
        // Overshoot past x = 50 on the first step.
        pos = f.advance(pos, 0.625);
        assert_eq!(pos, Vec2::new(62.5, 0.0));
        // Snap back onto the waypoint, then move up a full step.
        pos = f.advance(pos, 0.125);
        assert_eq!(f.state(), IconState::Up);
        assert_eq!(pos, Vec2::new(50.0, -12.5));
        assert_eq!(f.remaining().len(), 1);
    }

    #[test]
    fn single_point_path_is_idle() {
        let mut f = follower();
        let mut pos = Vec2::ZERO;
        f.start_path(&mut pos, &[Vec2::new(3.0, 4.0)]).unwrap();
        assert_eq!(pos, Vec2::new(3.0, 4.0));
        assert!(f.is_idle());
        assert_eq!(f.advance(pos, 1.0), pos);
    }

    #[test]
    fn empty_path_does_not_move() {
        let mut f = follower();
        let mut pos = Vec2::new(1.0, 1.0);
        f.start_path(&mut pos, &[]).unwrap();
        assert_eq!(pos, Vec2::new(1.0, 1.0));
        assert_eq!(f.state(), IconState::Idle);
    }

    #[test]
    fn diagonal_leg_is_rejected() {
        let mut f = follower();
        let mut pos = Vec2::ZERO;
        let err = f
            .start_path(&mut pos, &[Vec2::ZERO, Vec2::new(10.0, 10.0)])
            .unwrap_err();
        assert!(matches!(err, SpriteError::InvalidState(_)));
        assert!(f.is_idle());
    }

    #[test]
    fn duplicate_point_is_consumed_without_moving_off_path() {
        let mut f = follower();
        let mut pos = Vec2::ZERO;
        f.start_path(&mut pos, &[Vec2::ZERO, Vec2::ZERO]).unwrap();
        pos = f.advance(pos, 0.5);
        assert_eq!(pos, Vec2::ZERO);
        assert!(f.is_idle());
    }

    fn seq(ids: &[u32]) -> Arc<[ImageHandle]> {
        ids.iter().copied().map(ImageHandle).collect()
    }

    #[test]
    fn icon_animation_uses_state_frames() {
        let frames = DirectionalFrames {
            idle: seq(&[0]),
            up: seq(&[10, 11]),
            down: seq(&[20, 21]),
            left: seq(&[30, 31]),
            right: seq(&[40, 41]),
        };
        let mut anim = IconAnimation::new(frames, 2.0).unwrap();
        assert_eq!(anim.advance(IconState::Idle, 0.25), ImageHandle(0));
        assert_eq!(anim.advance(IconState::Right, 0.25), ImageHandle(41));
    }

    #[test]
    fn icon_animation_requires_every_state() {
        let frames = DirectionalFrames {
            idle: seq(&[0]),
            up: seq(&[]),
            down: seq(&[1]),
            left: seq(&[2]),
            right: seq(&[3]),
        };
        assert!(matches!(
            IconAnimation::new(frames, 6.0),
            Err(SpriteError::InvalidState(_))
        ));
    }
}
