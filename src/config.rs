// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Where events are stored. Defaults to `saved_events.json` in the data directory.
    #[serde(default)]
    pub events_file: Option<PathBuf>,
    /// Refuse `/addevent` and `/editevent` ranges whose end is not after their start.
    #[serde(default)]
    pub reject_inverted_ranges: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            events_file: None,
            reject_inverted_ranges: false,
            // Match the serde defaults
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration, falling back to defaults when no file exists.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// The events file: the configured one, or the context default.
    pub fn resolve_events_path(&self, ctx: &dyn AppContext) -> Option<PathBuf> {
        self.events_file.clone().or_else(|| ctx.get_events_path())
    }

    /// Maps `log_level` onto a filter, defaulting to `Info` for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
