//! Movement systems.
//!
//! Each system owns one motion rule and only touches entities carrying the
//! matching component:
//! - [`patrol_system`] – [`LinearPatrol`], snapshotting [`PreviousPosition`] first
//! - [`orbit_system`] – [`Orbit`], recomputed from the angle
//! - [`waypoint_system`] – [`WaypointFollower`]
//! - [`drift_system`] – [`Drift`], despawning clouds that left the screen

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::drift::Drift;
use crate::components::mapposition::{MapPosition, PreviousPosition};
use crate::components::orbit::Orbit;
use crate::components::patrol::LinearPatrol;
use crate::components::sprite::Sprite;
use crate::components::waypoint::WaypointFollower;
use crate::resources::worldtime::WorldTime;

pub fn patrol_system(
    mut query: Query<(
        &mut MapPosition,
        &mut PreviousPosition,
        &mut LinearPatrol,
        Option<&mut Sprite>,
    )>,
    time: Res<WorldTime>,
) {
    for (mut position, mut previous, mut patrol, sprite) in query.iter_mut() {
        previous.pos = position.pos;
        position.pos = patrol.advance(position.pos, time.delta);
        if let Some(mut sprite) = sprite {
            if patrol.flip {
                sprite.flip_h = patrol.reversed_x;
                sprite.flip_v = patrol.reversed_y;
            }
        }
    }
}

pub fn orbit_system(
    mut query: Query<(&mut MapPosition, &mut Orbit, Option<&mut PreviousPosition>)>,
    time: Res<WorldTime>,
) {
    for (mut position, mut orbit, previous) in query.iter_mut() {
        if let Some(mut previous) = previous {
            previous.pos = position.pos;
        }
        position.pos = orbit.advance(time.delta);
    }
}

pub fn waypoint_system(
    mut query: Query<(&mut MapPosition, &mut WaypointFollower)>,
    time: Res<WorldTime>,
) {
    for (mut position, mut follower) in query.iter_mut() {
        position.pos = follower.advance(position.pos, time.delta);
    }
}

pub fn drift_system(
    mut query: Query<(Entity, &mut MapPosition, &Drift, &Sprite)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut position, drift, sprite) in query.iter_mut() {
        position.pos = drift.advance(position.pos, time.delta);
        let right_edge = sprite.top_left(position.pos).x + sprite.size.x;
        if right_edge <= 0.0 {
            debug!("cloud {entity:?} left the screen");
            commands.entity(entity).try_despawn();
        }
    }
}
