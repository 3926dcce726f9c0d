//! Player progression shared across stages.
//!
//! [`Progress`] lives outside every entity registry: the overworld and each
//! level only borrow it for the calls that read or change it, so it survives
//! stage switches untouched.

use serde::{Deserialize, Serialize};

use crate::resources::gameconfig::GameConfig;

/// Unlock count granted when a level is completed.
pub const ALL_LEVELS_UNLOCKED: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub coins: i32,
    pub health: i32,
    pub current_level: u32,
    pub unlocked_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self::from_config(&GameConfig::new())
    }
}

impl Progress {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            coins: config.starting_coins,
            health: config.starting_health,
            current_level: 0,
            unlocked_level: config.starting_unlocked_level,
        }
    }

    pub fn add_coins(&mut self, delta: i32) {
        self.coins += delta;
    }

    pub fn add_health(&mut self, delta: i32) {
        self.health += delta;
    }

    /// The player finished the current level.
    pub fn complete_level(&mut self) {
        self.unlocked_level = self.unlocked_level.max(ALL_LEVELS_UNLOCKED);
    }

    /// The player left a level without finishing it.
    pub fn fail_level(&mut self) {
        self.health -= 1;
    }

    pub fn is_game_over(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failing_costs_one_health_until_game_over() {
        let mut progress = Progress {
            health: 2,
            ..Progress::default()
        };
        progress.fail_level();
        assert!(!progress.is_game_over());
        progress.fail_level();
        assert!(progress.is_game_over());
    }

    #[test]
    fn completing_unlocks_every_level() {
        let mut progress = Progress::default();
        progress.complete_level();
        assert_eq!(progress.unlocked_level, ALL_LEVELS_UNLOCKED);
    }
}
