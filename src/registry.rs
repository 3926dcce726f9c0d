//! Entity registry.
//!
//! [`EntityRegistry`] owns one ECS [`World`] holding every live entity of a
//! stage together with the update [`Schedule`] that drives them. It is the
//! only way entities are added, removed, advanced and listed for drawing.
//!
//! - Spawned entities always get [`Groups`] and a [`SpawnOrder`], so group
//!   queries and draw ordering work for every kind.
//! - Removals requested from inside the update pass go through `Commands` and
//!   are applied when the pass ends; systems never see a removed entity.
//! - Switching stages drops the whole registry and builds a new one.

use bevy_ecs::prelude::*;

use crate::components::group::Groups;
use crate::components::mapposition::MapPosition;
use crate::components::zindex::SpawnOrder;
use crate::resources::worldtime::WorldTime;
use crate::systems::render::{DrawItem, draw_list};
use crate::systems::time::update_world_time;
use crate::systems::update_schedule;

pub struct EntityRegistry {
    world: World,
    schedule: Schedule,
    next_order: u64,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRegistry {
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        Self {
            world,
            schedule: update_schedule(),
            next_order: 0,
        }
    }

    /// Add an entity made of `bundle`, tagged with `groups`.
    pub fn spawn<B: Bundle>(&mut self, bundle: B, groups: Groups) -> Entity {
        let order = SpawnOrder(self.next_order);
        self.next_order += 1;
        self.world.spawn((bundle, groups, order)).id()
    }

    /// Remove an entity immediately. Returns `false` if it was already gone.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.world.despawn(entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    pub fn len(&self) -> usize {
        self.world
            .try_query::<&SpawnOrder>()
            .map_or(0, |mut query| query.iter(&self.world).count())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run one update pass.
    pub fn advance(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
    }

    /// Every drawable entity in paint order.
    pub fn draw_order(&mut self) -> Vec<DrawItem> {
        draw_list(&mut self.world)
    }

    /// Members of `group` in spawn order.
    pub fn group(&self, group: &str) -> Vec<Entity> {
        let Some(mut query) = self.world.try_query::<(Entity, &Groups, &SpawnOrder)>() else {
            return Vec::new();
        };
        let mut members: Vec<(SpawnOrder, Entity)> = query
            .iter(&self.world)
            .filter(|(_, groups, _)| groups.contains(group))
            .map(|(entity, _, order)| (*order, entity))
            .collect();
        members.sort_by_key(|(order, _)| *order);
        members.into_iter().map(|(_, entity)| entity).collect()
    }

    pub fn count_group(&self, group: &str) -> usize {
        self.world.try_query::<&Groups>().map_or(0, |mut query| {
            query
                .iter(&self.world)
                .filter(|groups| groups.contains(group))
                .count()
        })
    }

    pub fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.world.get::<C>(entity)
    }

    pub fn get_mut<C: Component<Mutability = bevy_ecs::component::Mutable>>(
        &mut self,
        entity: Entity,
    ) -> Option<Mut<'_, C>> {
        self.world.get_mut::<C>(entity)
    }

    pub fn position(&self, entity: Entity) -> Option<glam::Vec2> {
        self.get::<MapPosition>(entity).map(|p| p.pos)
    }

    pub fn time(&self) -> &WorldTime {
        self.world.resource::<WorldTime>()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
