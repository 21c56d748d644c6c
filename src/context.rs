// File: ./src/context.rs
//! Where TaskFlow keeps its files.
//!
//! Code that touches the disk takes a `&dyn AppContext`. The real one maps to
//! the platform directories (or `--root`); tests get a throwaway directory.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub const EVENTS_FILENAME: &str = "saved_events.json";
pub const LOG_FILENAME: &str = "taskflow.log";

/// Directory layout: `config/config.toml`, `data/saved_events.json`, `data/taskflow.log`.
pub trait AppContext: std::fmt::Debug {
    fn get_data_dir(&self) -> Result<PathBuf>;
    fn get_config_dir(&self) -> Result<PathBuf>;

    fn get_config_file_path(&self) -> Result<PathBuf> {
        Ok(self.get_config_dir()?.join("config.toml"))
    }

    fn get_events_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(EVENTS_FILENAME))
    }

    fn get_log_path(&self) -> Option<PathBuf> {
        self.get_data_dir().ok().map(|p| p.join(LOG_FILENAME))
    }
}

#[derive(Clone, Debug)]
pub struct StandardContext {
    override_root: Option<PathBuf>,
}

impl StandardContext {
    /// `Some(root)` puts `data/` and `config/` under `root` instead of the
    /// platform directories.
    pub fn new(override_root: Option<PathBuf>) -> Self {
        Self { override_root }
    }

    fn created(dir: PathBuf) -> Result<PathBuf> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create {}", dir.display()))?;
        Ok(dir)
    }

    fn platform_dir(pick: fn(&ProjectDirs) -> &std::path::Path) -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "taskflow", "taskflow")
            .ok_or_else(|| anyhow::anyhow!("Cannot locate a home directory"))?;
        Self::created(pick(&dirs).to_path_buf())
    }
}

impl AppContext for StandardContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        match &self.override_root {
            Some(root) => Self::created(root.join("data")),
            None => Self::platform_dir(ProjectDirs::data_dir),
        }
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        match &self.override_root {
            Some(root) => Self::created(root.join("config")),
            None => Self::platform_dir(ProjectDirs::config_dir),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TestContext {
    pub root: PathBuf,
}

impl TestContext {
    /// A fresh directory under the system temp dir, deleted on drop.
    pub fn new() -> Self {
        let root = std::env::temp_dir().join(format!("taskflow_test_{}", uuid::Uuid::new_v4()));
        let _ = std::fs::create_dir_all(&root);
        Self { root }
    }

    fn subdir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.root.join(name);
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContext for TestContext {
    fn get_data_dir(&self) -> Result<PathBuf> {
        self.subdir("data")
    }

    fn get_config_dir(&self) -> Result<PathBuf> {
        self.subdir("config")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}
