//! Time update system.
//!
//! Updates the [`WorldTime`](crate::resources::worldtime::WorldTime) resource
//! once per tick, applying `time_scale` to the provided delta.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Update elapsed and delta seconds on the `WorldTime` resource.
///
/// `dt` is the unscaled frame delta in seconds supplied by the host clock.
/// Negative values are treated as zero.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.get_resource_or_insert_with(WorldTime::default);
    let scaled_dt = dt.max(0.0) * wt.time_scale;
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.frame_count += 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_delta_is_clamped() {
        let mut world = World::new();
        update_world_time(&mut world, 0.5);
        update_world_time(&mut world, -1.0);
        let wt = world.resource::<WorldTime>();
        assert_eq!(wt.delta, 0.0);
        assert_eq!(wt.elapsed, 0.5);
        assert_eq!(wt.frame_count, 2);
    }

    #[test]
    fn time_scale_applies() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            time_scale: 0.5,
            ..WorldTime::default()
        });
        update_world_time(&mut world, 0.5);
        assert_eq!(world.resource::<WorldTime>().delta, 0.25);
    }
}
