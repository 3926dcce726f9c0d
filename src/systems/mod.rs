//! Runtime systems.
//!
//! This module groups all ECS systems that advance the simulation, plus the
//! draw-list extraction used by the host renderer.
//!
//! Submodules overview
//! - [`animation`] – advance frame animations, despawn finished one-shots
//! - [`movement`] – patrol, orbit, waypoint and drift motion
//! - [`render`] – collect sprites in paint order
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod movement;
pub mod render;
pub mod time;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

use crate::systems::animation::{animation_system, icon_animation_system};
use crate::systems::movement::{drift_system, orbit_system, patrol_system, waypoint_system};

/// The per-tick update pass: movement first, then animation so that the
/// icon animation sees this tick's heading. Deferred despawns are applied
/// when the schedule finishes.
pub fn update_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            patrol_system,
            orbit_system,
            waypoint_system,
            drift_system,
            animation_system,
            icon_animation_system,
        )
            .chain(),
    );
    schedule
}
