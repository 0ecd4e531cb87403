use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::leaderboard::DEFAULT_CAPACITY;

pub const MAX_LEADERBOARD_SIZE: usize = 10;
pub const MIN_TICK_RATE_MS: u64 = 16;
pub const MAX_TICK_RATE_MS: u64 = 1_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_player_name")]
    pub player_name: String,
    #[serde(default = "default_leaderboard_size")]
    pub leaderboard_size: usize,
    #[serde(default = "default_confirm_abandon")]
    pub confirm_abandon: bool,
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_player_name() -> String {
    "Guest".to_string()
}
fn default_leaderboard_size() -> usize {
    DEFAULT_CAPACITY
}
fn default_confirm_abandon() -> bool {
    true
}
fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            player_name: default_player_name(),
            leaderboard_size: default_leaderboard_size(),
            confirm_abandon: default_confirm_abandon(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Load the config file, writing the defaults out first if there is none
    /// so there is something to edit.
    pub fn load_or_init() -> Result<Self> {
        if Self::config_path().exists() {
            return Self::load();
        }
        let config = Config::default();
        if let Err(e) = config.save() {
            log::warn!("could not write default config: {e}");
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quickmath")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Clamp values a hand-edited file or CLI flag may have pushed out of range.
    pub fn validate(&mut self) {
        self.leaderboard_size = self.leaderboard_size.clamp(1, MAX_LEADERBOARD_SIZE);
        self.tick_rate_ms = self.tick_rate_ms.clamp(MIN_TICK_RATE_MS, MAX_TICK_RATE_MS);
        let trimmed = self.player_name.trim();
        if trimmed.is_empty() {
            self.player_name = default_player_name();
        } else if trimmed.len() != self.player_name.len() {
            self.player_name = trimmed.to_string();
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }
}
