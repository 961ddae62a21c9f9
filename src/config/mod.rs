use crate::global;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub calendar: CalendarConfig,
    pub transcription: TranscriptionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the meetings API, including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout. Unset means requests wait indefinitely.
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Default number of events returned by `calendar upcoming`
    pub upcoming_limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Server-side transcription provider, e.g. "huggingface" or "openai"
    pub provider: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { upcoming_limit: 10 }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let content =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;

        info!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, content).context("Failed to write config file")?;

        Ok(())
    }

    /// Pick the API base URL: command-line flag, then environment, then config file.
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<&str>) -> String {
        fn non_blank(url: Option<&str>) -> Option<&str> {
            url.map(str::trim).filter(|url| !url.is_empty())
        }

        non_blank(flag)
            .or_else(|| non_blank(env))
            .unwrap_or(self.api.base_url.as_str())
            .to_string()
    }

    /// Same as [`Config::resolve_base_url`], reading the environment variable itself.
    pub fn base_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(global::API_URL_ENV).ok();
        self.resolve_base_url(flag, env.as_deref())
    }

    pub fn config_path() -> Result<PathBuf> {
        global::config_file()
    }
}
