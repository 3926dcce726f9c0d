//! Buccaneer library.
//!
//! Entity runtime for a tile-based 2D platformer: frame animation, patrols,
//! orbiting hazards, an overworld icon walking between level nodes, and the
//! registry that updates and orders them for drawing. Images arrive as opaque
//! handles and levels as pre-parsed descriptions; the host does the painting.
//!
//! - [`components`] – ECS components (sprites, motion rules, collectibles, nodes)
//! - [`registry`] – the per-stage entity registry
//! - [`level`] / [`overworld`] – the two kinds of stage
//! - [`game`] – progression and stage switching
//! - [`resources`] – configuration, progress, image keys, descriptions
//! - [`systems`] – per-tick update systems and draw-list extraction

pub mod components;
pub mod error;
pub mod game;
pub mod level;
pub mod overworld;
pub mod registry;
pub mod resources;
pub mod systems;
