// File logger setup. The TUI owns the terminal, so log lines go to a file in
// the data directory.
use crate::context::AppContext;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;

pub fn init(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx
        .get_log_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file location"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let config = ConfigBuilder::new()
        .add_filter_allow_str("taskflow")
        .build();
    WriteLogger::init(level, config, file)?;
    log::info!("TaskFlow v{} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}
