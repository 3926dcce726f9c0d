//! Stage switching and progression.
//!
//! [`Game`] owns the shared [`Progress`], the loaded descriptions and the one
//! active scene. Switching stage drops the old scene's registry entirely and
//! builds a fresh one; only [`Progress`] carries over.
//!
//! Returning to the overworld settles the level that was just played: a
//! non-zero `unlock` completes it, zero costs one health point.

use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;

use crate::components::boxcollider::BoxCollider;
use crate::components::waypoint::Direction;
use crate::error::LevelError;
use crate::level::LevelScene;
use crate::overworld::OverworldScene;
use crate::resources::gameconfig::GameConfig;
use crate::resources::imagestore::ImageStore;
use crate::resources::leveldesc::{LevelDescription, OverworldDescription};
use crate::resources::progress::Progress;
use crate::systems::render::DrawItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Play `progress.current_level`.
    Level,
    /// Back to level select; `unlock > 0` means the level was cleared.
    Overworld { unlock: u32 },
}

pub enum Scene {
    Level(LevelScene),
    Overworld(OverworldScene),
}

pub struct Game {
    config: GameConfig,
    images: ImageStore,
    levels: FxHashMap<u32, LevelDescription>,
    overworld: OverworldDescription,
    progress: Progress,
    scene: Scene,
}

impl Game {
    /// Start a playthrough on the overworld.
    pub fn new(
        config: GameConfig,
        images: ImageStore,
        levels: FxHashMap<u32, LevelDescription>,
        overworld: OverworldDescription,
    ) -> Result<Self, LevelError> {
        let progress = Progress::from_config(&config);
        let scene = Scene::Overworld(OverworldScene::from_description(
            &overworld, &images, &config, &progress,
        )?);
        Ok(Self {
            config,
            images,
            levels,
            overworld,
            progress,
            scene,
        })
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn progress_mut(&mut self) -> &mut Progress {
        &mut self.progress
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn level(&mut self) -> Option<&mut LevelScene> {
        match &mut self.scene {
            Scene::Level(level) => Some(level),
            Scene::Overworld(_) => None,
        }
    }

    pub fn overworld(&mut self) -> Option<&mut OverworldScene> {
        match &mut self.scene {
            Scene::Overworld(overworld) => Some(overworld),
            Scene::Level(_) => None,
        }
    }

    pub fn switch_stage(&mut self, stage: Stage) -> Result<(), LevelError> {
        match stage {
            Stage::Level => {
                let level = self.progress.current_level;
                self.scene = Scene::Level(self.build_level(level)?);
                info!("switched to level {level}");
            }
            Stage::Overworld { unlock } => {
                if unlock > 0 {
                    self.progress.complete_level();
                } else {
                    self.progress.fail_level();
                }
                self.scene = Scene::Overworld(OverworldScene::from_description(
                    &self.overworld,
                    &self.images,
                    &self.config,
                    &self.progress,
                )?);
                info!(
                    "switched to overworld: health={} coins={} unlocked={}",
                    self.progress.health, self.progress.coins, self.progress.unlocked_level
                );
            }
        }
        Ok(())
    }

    /// Rebuild the level being played from its description.
    pub fn restart_level(&mut self) -> Result<(), LevelError> {
        let level = self.progress.current_level;
        self.scene = Scene::Level(self.build_level(level)?);
        info!("restarted level {level}");
        Ok(())
    }

    fn build_level(&self, level: u32) -> Result<LevelScene, LevelError> {
        let desc = self
            .levels
            .get(&level)
            .ok_or(LevelError::MissingLevel(level))?;
        LevelScene::from_description(level, desc, &self.images, &self.config)
    }

    pub fn advance(&mut self, dt: f32) {
        match &mut self.scene {
            Scene::Level(level) => level.advance(dt),
            Scene::Overworld(overworld) => overworld.advance(dt),
        }
    }

    /// Pick up items touching the player. Zero outside a level.
    pub fn collect_items(&mut self, player_pos: Vec2, player_box: &BoxCollider) -> usize {
        match &mut self.scene {
            Scene::Level(level) => level.collect_items(player_pos, player_box, &mut self.progress),
            Scene::Overworld(_) => 0,
        }
    }

    pub fn try_move(&mut self, direction: Direction) -> bool {
        match &mut self.scene {
            Scene::Overworld(overworld) => overworld.try_move(direction, &self.progress),
            Scene::Level(_) => false,
        }
    }

    /// Select the level under the overworld icon and enter it.
    pub fn enter_selected_level(&mut self) -> Result<bool, LevelError> {
        let selected = match &self.scene {
            Scene::Overworld(overworld) => overworld.select_level(&mut self.progress),
            Scene::Level(_) => None,
        };
        if selected.is_none() {
            return Ok(false);
        }
        self.switch_stage(Stage::Level)?;
        Ok(true)
    }

    pub fn is_game_over(&self) -> bool {
        self.progress.is_game_over()
    }

    pub fn draw_order(&mut self) -> Vec<DrawItem> {
        match &mut self.scene {
            Scene::Level(level) => level.draw_order(),
            Scene::Overworld(overworld) => overworld.draw_order(),
        }
    }
}
