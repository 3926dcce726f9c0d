//! Playable level scene.
//!
//! A [`LevelScene`] is built from a [`LevelDescription`]: every spawn
//! descriptor becomes one entity in a fresh [`EntityRegistry`]. Loading
//! stops at the first bad descriptor and reports which one it was.
//!
//! Pickups are an explicit query: the caller passes the player's collider
//! and the shared [`Progress`] to [`LevelScene::collect_items`] once per
//! tick, after the update pass.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, info, warn};

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::collectible::{Collectible, CollectibleKind};
use crate::components::drift::Drift;
use crate::components::group::{self, Groups};
use crate::components::mapposition::{MapPosition, PreviousPosition};
use crate::components::orbit::Orbit;
use crate::components::patrol::{Axis, LinearPatrol};
use crate::components::sprite::{ImageHandle, Sprite};
use crate::components::zindex::ZLayer;
use crate::error::{LevelError, SpriteError};
use crate::registry::EntityRegistry;
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::ImageStore;
use crate::resources::leveldesc::{LevelDescription, SpawnDescriptor};
use crate::resources::progress::Progress;
use crate::systems::render::DrawItem;

/// Frame sequence used for the burst left behind by a picked-up item.
pub const PARTICLE_KEY: &str = "particle";

pub struct LevelScene {
    level: u32,
    registry: EntityRegistry,
    particle: Option<Arc<[ImageHandle]>>,
    animation_speed: f32,
}

impl LevelScene {
    pub fn from_description(
        level: u32,
        desc: &LevelDescription,
        images: &ImageStore,
        config: &GameConfig,
    ) -> Result<Self, LevelError> {
        let mut registry = EntityRegistry::new();
        for (index, descriptor) in desc.entities.iter().enumerate() {
            if let Err(e) = spawn_descriptor(&mut registry, index, descriptor, images, config) {
                warn!("level {level}: {e}");
                return Err(e);
            }
        }
        let particle = images.frames(PARTICLE_KEY);
        if particle.is_none() {
            warn!("level {level}: no '{PARTICLE_KEY}' frames, pickups leave no effect");
        }
        info!(
            "level {level} '{}' loaded with {} entities",
            desc.name,
            desc.entities.len()
        );
        Ok(Self {
            level,
            registry,
            particle,
            animation_speed: config.animation_speed,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn advance(&mut self, dt: f32) {
        self.registry.advance(dt);
    }

    pub fn draw_order(&mut self) -> Vec<DrawItem> {
        self.registry.draw_order()
    }

    /// Activate, remove and replace with a particle burst every item whose
    /// collider overlaps the player. Returns how many were collected.
    pub fn collect_items(
        &mut self,
        player_pos: Vec2,
        player_box: &BoxCollider,
        progress: &mut Progress,
    ) -> usize {
        let hits: Vec<(Entity, Collectible, Vec2)> = self
            .registry
            .world_mut()
            .query::<(Entity, &Collectible, &MapPosition, &BoxCollider)>()
            .iter(self.registry.world())
            .filter(|(_, _, pos, collider)| collider.overlaps(pos.pos, player_box, player_pos))
            .map(|(entity, item, pos, _)| (entity, *item, pos.pos))
            .collect();

        for (entity, item, center) in &hits {
            item.activate(progress);
            self.registry.remove(*entity);
            debug!("collected {} at {center}", item.kind);
            self.spawn_particle(*center);
        }
        hits.len()
    }

    fn spawn_particle(&mut self, center: Vec2) {
        let Some(frames) = self.particle.clone() else {
            return;
        };
        let Ok(anim) = Animation::once(frames, self.animation_speed) else {
            return;
        };
        let Some(first) = anim.current() else {
            return;
        };
        self.registry.spawn(
            (
                MapPosition::from(center),
                Sprite::centered(first, Vec2::ZERO),
                anim,
                ZLayer::Foreground,
            ),
            Groups::new(),
        );
    }
}

fn image_for(
    images: &ImageStore,
    index: usize,
    kind: &'static str,
    key: &str,
) -> Result<ImageHandle, LevelError> {
    images.image(key).ok_or_else(|| LevelError::MissingImage {
        index,
        kind,
        key: key.to_string(),
    })
}

fn frames_for(
    images: &ImageStore,
    index: usize,
    kind: &'static str,
    key: &str,
) -> Result<Arc<[ImageHandle]>, LevelError> {
    images.frames(key).ok_or_else(|| LevelError::MissingImage {
        index,
        kind,
        key: key.to_string(),
    })
}

/// Build one entity from its descriptor.
pub fn spawn_descriptor(
    registry: &mut EntityRegistry,
    index: usize,
    descriptor: &SpawnDescriptor,
    images: &ImageStore,
    config: &GameConfig,
) -> Result<Entity, LevelError> {
    let kind = descriptor.kind();
    let invalid = |source: SpriteError| LevelError::Entity {
        index,
        kind,
        source,
    };
    let tile = Vec2::splat(config.tile_size);

    let entity = match descriptor {
        SpawnDescriptor::Static {
            pos,
            image,
            layer,
            collidable,
        } => {
            let handle = image_for(images, index, kind, image)?;
            let sprite = Sprite::new(handle, images.size_or(image, tile));
            let mut groups = Groups::new();
            if *collidable {
                groups = groups.with(group::COLLIDABLE);
            }
            registry.spawn(
                (
                    MapPosition::from(*pos),
                    BoxCollider::from_sprite(&sprite),
                    sprite,
                    *layer,
                ),
                groups,
            )
        }
        SpawnDescriptor::Animated {
            pos,
            frames,
            layer,
            speed,
            damage,
        } => {
            let seq = frames_for(images, index, kind, frames)?;
            let anim = Animation::new(seq, speed.unwrap_or(config.animation_speed))
                .map_err(invalid)?;
            let first = anim.frames()[0];
            let sprite = Sprite::new(first, images.size_or(frames, tile));
            let mut groups = Groups::new();
            if *damage {
                groups = groups.with(group::DAMAGE);
            }
            registry.spawn(
                (
                    MapPosition::from(*pos),
                    BoxCollider::from_sprite(&sprite),
                    sprite,
                    anim,
                    *layer,
                ),
                groups,
            )
        }
        SpawnDescriptor::Patrol {
            start,
            end,
            axis,
            speed,
            frames,
            direction,
            flip,
            damage,
        } => {
            let seq = frames_for(images, index, kind, frames)?;
            let patrol = LinearPatrol::new(*start, *end, *axis, *speed)
                .map_err(invalid)?
                .with_direction(*direction)
                .with_flip(*flip);
            let anim = Animation::new(seq, config.animation_speed).map_err(invalid)?;
            let first = anim.frames()[0];
            let size = images.size_or(frames, tile);
            // Level coordinates name the leading edge's midpoint.
            let sprite = match axis {
                Axis::Horizontal => Sprite::mid_left(first, size),
                Axis::Vertical => Sprite::mid_top(first, size),
            };
            let groups = if *damage {
                Groups::new().with(group::DAMAGE)
            } else {
                Groups::new().with(group::COLLIDABLE)
            };
            registry.spawn(
                (
                    MapPosition::from(*start),
                    PreviousPosition::from(*start),
                    BoxCollider::from_sprite(&sprite),
                    sprite,
                    anim,
                    patrol,
                    ZLayer::Main,
                ),
                groups,
            )
        }
        SpawnDescriptor::Orbit {
            center,
            radius,
            speed,
            start_angle,
            end_angle,
            image,
        } => {
            let handle = image_for(images, index, kind, image)?;
            let orbit = Orbit::from_sentinel(*center, *radius, *speed, *start_angle, *end_angle)
                .map_err(invalid)?;
            let pos = orbit.position();
            let sprite = Sprite::centered(handle, images.size_or(image, tile));
            registry.spawn(
                (
                    MapPosition::from(pos),
                    PreviousPosition::from(pos),
                    BoxCollider::from_sprite(&sprite),
                    sprite,
                    orbit,
                    ZLayer::Main,
                ),
                Groups::new().with(group::DAMAGE),
            )
        }
        SpawnDescriptor::Item { item, pos } => {
            let item_kind: CollectibleKind = item.parse().map_err(invalid)?;
            let key = format!("items/{item_kind}");
            let seq = frames_for(images, index, kind, &key)?;
            let anim = Animation::new(seq, config.animation_speed).map_err(invalid)?;
            let first = anim.frames()[0];
            let sprite = Sprite::centered(first, images.size_or(&key, tile));
            registry.spawn(
                (
                    MapPosition::from(*pos),
                    BoxCollider::from_sprite(&sprite),
                    sprite,
                    anim,
                    Collectible::new(item_kind),
                    ZLayer::Main,
                ),
                Groups::new().with(group::ITEMS),
            )
        }
        SpawnDescriptor::Cloud { pos, image } => {
            let handle = image_for(images, index, kind, image)?;
            let sprite = Sprite::mid_bottom(handle, images.size_or(image, tile));
            registry.spawn(
                (
                    MapPosition::from(*pos),
                    sprite,
                    Drift::random_cloud(),
                    ZLayer::Clouds,
                ),
                Groups::new().with(group::CLOUDS),
            )
        }
    };
    Ok(entity)
}
