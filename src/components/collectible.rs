//! Collectible items.
//!
//! Item kinds are parsed when a level is spawned, so an unknown kind fails
//! loading instead of turning into an item that silently does nothing.

use std::fmt;
use std::str::FromStr;

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::error::SpriteError;
use crate::resources::progress::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectibleKind {
    Gold,
    Silver,
    Diamond,
    Skull,
    Potion,
}

/// What picking an item up does to [`Progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEffect {
    Coins(i32),
    Health(i32),
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 5] = [
        CollectibleKind::Gold,
        CollectibleKind::Silver,
        CollectibleKind::Diamond,
        CollectibleKind::Skull,
        CollectibleKind::Potion,
    ];

    pub fn effect(self) -> ItemEffect {
        match self {
            CollectibleKind::Gold => ItemEffect::Coins(5),
            CollectibleKind::Silver => ItemEffect::Coins(1),
            CollectibleKind::Diamond => ItemEffect::Coins(20),
            CollectibleKind::Skull => ItemEffect::Coins(50),
            CollectibleKind::Potion => ItemEffect::Health(1),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CollectibleKind::Gold => "gold",
            CollectibleKind::Silver => "silver",
            CollectibleKind::Diamond => "diamond",
            CollectibleKind::Skull => "skull",
            CollectibleKind::Potion => "potion",
        }
    }
}

impl fmt::Display for CollectibleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CollectibleKind {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gold" => Ok(CollectibleKind::Gold),
            "silver" => Ok(CollectibleKind::Silver),
            "diamond" => Ok(CollectibleKind::Diamond),
            "skull" => Ok(CollectibleKind::Skull),
            "potion" => Ok(CollectibleKind::Potion),
            other => Err(SpriteError::Configuration(format!(
                "unknown collectible kind '{other}'"
            ))),
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
}

impl Collectible {
    pub fn new(kind: CollectibleKind) -> Self {
        Self { kind }
    }

    /// Apply the item's effect. Called once, when the owning scene detects
    /// the pickup.
    pub fn activate(&self, progress: &mut Progress) {
        match self.kind.effect() {
            ItemEffect::Coins(delta) => progress.add_coins(delta),
            ItemEffect::Health(delta) => progress.add_health(delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gold_adds_five_coins() {
        let mut progress = Progress::default();
        let coins = progress.coins;
        Collectible::new(CollectibleKind::Gold).activate(&mut progress);
        assert_eq!(progress.coins, coins + 5);
    }

    #[test]
    fn potion_adds_one_health() {
        let mut progress = Progress::default();
        let health = progress.health;
        let coins = progress.coins;
        Collectible::new(CollectibleKind::Potion).activate(&mut progress);
        assert_eq!(progress.health, health + 1);
        assert_eq!(progress.coins, coins);
    }

    #[test]
    fn coin_values() {
        assert_eq!(CollectibleKind::Silver.effect(), ItemEffect::Coins(1));
        assert_eq!(CollectibleKind::Diamond.effect(), ItemEffect::Coins(20));
        assert_eq!(CollectibleKind::Skull.effect(), ItemEffect::Coins(50));
    }

    #[test]
    fn parses_known_kinds_and_rejects_unknown() {
        assert_eq!("skull".parse::<CollectibleKind>(), Ok(CollectibleKind::Skull));
        let err = "ruby".parse::<CollectibleKind>().unwrap_err();
        assert!(matches!(err, SpriteError::Configuration(_)));
    }
}
