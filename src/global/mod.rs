use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "meetsum";

/// Overrides the config directory, mostly for tests and sandboxed runs.
pub const HOME_ENV: &str = "MEETSUM_HOME";

/// Overrides the configured API base URL.
pub const API_URL_ENV: &str = "MEETSUM_API_URL";

pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Unable to determine config directory")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
