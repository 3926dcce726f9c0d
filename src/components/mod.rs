//! ECS components for entities.
//!
//! An entity's kind is the set of components it carries: a static sprite is
//! just [`sprite::Sprite`] + [`mapposition::MapPosition`] + [`zindex::ZLayer`];
//! adding [`animation::Animation`] makes it animated, [`patrol::LinearPatrol`]
//! makes it patrol, and so on. Systems in [`crate::systems`] pick entities by
//! the components they need.
//!
//! Submodules overview:
//! - [`animation`] – frame-sequence playback clock, looping or one-shot
//! - [`boxcollider`] – axis-aligned box used by pickup queries
//! - [`collectible`] – item kinds and their effect on progress
//! - [`drift`] – constant leftward drift for clouds
//! - [`group`] – named group membership
//! - [`mapposition`] – world-space pivot and previous-tick pivot
//! - [`node`] – overworld graph nodes and path tiles
//! - [`orbit`] – circular motion around a center
//! - [`patrol`] – back-and-forth motion between two endpoints
//! - [`sprite`] – current image, size and pivot
//! - [`waypoint`] – waypoint path follower and its directional animation
//! - [`zindex`] – draw layer and spawn order

pub mod animation;
pub mod boxcollider;
pub mod collectible;
pub mod drift;
pub mod group;
pub mod mapposition;
pub mod node;
pub mod orbit;
pub mod patrol;
pub mod sprite;
pub mod waypoint;
pub mod zindex;
