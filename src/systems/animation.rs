//! Animation systems.
//!
//! - [`animation_system`] advances every [`Animation`] and writes the chosen
//!   image into the entity's [`Sprite`]. One-shot animations that have run
//!   out despawn their entity.
//! - [`icon_animation_system`] does the same for the overworld icon, picking
//!   the frame sequence from the follower's heading.
//!
//! Both run after the movement systems so the icon's state reflects the
//! heading chosen this tick.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::animation::Animation;
use crate::components::sprite::Sprite;
use crate::components::waypoint::{IconAnimation, WaypointFollower};
use crate::resources::worldtime::WorldTime;

/// Advance frame-sequence animations and update the sprite image.
pub fn animation_system(
    mut query: Query<(Entity, &mut Animation, &mut Sprite)>,
    time: Res<WorldTime>,
    mut commands: Commands,
) {
    for (entity, mut anim, mut sprite) in query.iter_mut() {
        match anim.advance(time.delta) {
            Some(image) => sprite.image = image,
            None => {
                debug!("one-shot animation finished, despawning {entity:?}");
                commands.entity(entity).try_despawn();
            }
        }
    }
}

/// Advance the icon animation from the follower's derived state.
pub fn icon_animation_system(
    mut query: Query<(&WaypointFollower, &mut IconAnimation, &mut Sprite)>,
    time: Res<WorldTime>,
) {
    for (follower, mut anim, mut sprite) in query.iter_mut() {
        sprite.image = anim.advance(follower.state(), time.delta);
    }
}
