//! Game configuration.
//!
//! Manages game settings loaded from an INI configuration file. Provides
//! defaults for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [animation]
//! speed = 6
//!
//! [level]
//! tile_size = 64
//! window_width = 1280
//! window_height = 720
//!
//! [overworld]
//! icon_speed = 400
//!
//! [progress]
//! health = 5
//! coins = 0
//! unlocked_level = 0
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_ANIMATION_SPEED: f32 = 6.0;
const DEFAULT_TILE_SIZE: f32 = 64.0;
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_ICON_SPEED: f32 = 400.0;
const DEFAULT_HEALTH: i32 = 5;
const DEFAULT_COINS: i32 = 0;
const DEFAULT_UNLOCKED_LEVEL: u32 = 0;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration.
///
/// Stores animation and movement tuning, the tile grid size, and the values a
/// fresh playthrough starts with.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Frames per second for animated sprites.
    pub animation_speed: f32,
    /// Size of a map tile in pixels.
    pub tile_size: f32,
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Overworld icon speed in pixels per second.
    pub icon_speed: f32,
    pub starting_health: i32,
    pub starting_coins: i32,
    pub starting_unlocked_level: u32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            animation_speed: DEFAULT_ANIMATION_SPEED,
            tile_size: DEFAULT_TILE_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            icon_speed: DEFAULT_ICON_SPEED,
            starting_health: DEFAULT_HEALTH,
            starting_coins: DEFAULT_COINS,
            starting_unlocked_level: DEFAULT_UNLOCKED_LEVEL,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: animation speed={}, tile={}, window={}x{}, icon speed={}",
            self.animation_speed,
            self.tile_size,
            self.window_width,
            self.window_height,
            self.icon_speed
        );

        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [animation] section
        if let Some(speed) = config.getfloat("animation", "speed").ok().flatten() {
            self.animation_speed = speed as f32;
        }

        // [level] section
        if let Some(tile) = config.getfloat("level", "tile_size").ok().flatten() {
            self.tile_size = tile as f32;
        }
        if let Some(width) = config.getuint("level", "window_width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("level", "window_height").ok().flatten() {
            self.window_height = height as u32;
        }

        // [overworld] section
        if let Some(speed) = config.getfloat("overworld", "icon_speed").ok().flatten() {
            self.icon_speed = speed as f32;
        }

        // [progress] section
        if let Some(health) = config.getint("progress", "health").ok().flatten() {
            self.starting_health = health as i32;
        }
        if let Some(coins) = config.getint("progress", "coins").ok().flatten() {
            self.starting_coins = coins as i32;
        }
        if let Some(level) = config.getuint("progress", "unlocked_level").ok().flatten() {
            self.starting_unlocked_level = level as u32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("animation", "speed", Some(self.animation_speed.to_string()));

        config.set("level", "tile_size", Some(self.tile_size.to_string()));
        config.set("level", "window_width", Some(self.window_width.to_string()));
        config.set("level", "window_height", Some(self.window_height.to_string()));

        config.set("overworld", "icon_speed", Some(self.icon_speed.to_string()));

        config.set("progress", "health", Some(self.starting_health.to_string()));
        config.set("progress", "coins", Some(self.starting_coins.to_string()));
        config.set(
            "progress",
            "unlocked_level",
            Some(self.starting_unlocked_level.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }
}
