//! Tracing setup
//!
//! The terminal UI owns stdout and stderr, so logs can only go to a file.
//! Without a log file no subscriber is installed and events are dropped.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Install a file-backed subscriber filtered by `RUST_LOG` (default `info`)
pub fn init_file_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to install log subscriber: {err}"))?;

    Ok(())
}
