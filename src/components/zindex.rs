//! Draw layer component.
//!
//! The [`ZLayer`] component buckets entities for painting. Layers are drawn
//! in declaration order; inside one layer entities keep their spawn order
//! (see [`SpawnOrder`]).

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

/// Paint-order bucket. Later variants are drawn on top.
#[derive(
    Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ZLayer {
    Background,
    Clouds,
    Terrain,
    #[default]
    Main,
    Foreground,
    Path,
    Ui,
}

/// Sequence number handed out by the registry at spawn time.
///
/// Used as the tie breaker inside a [`ZLayer`].
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpawnOrder(pub u64);
