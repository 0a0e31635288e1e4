use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

pub const DEFAULT_BASE_URL: &str = "https://api.flightradar24.com/common/v1/airport.json";
pub const DEFAULT_USER_AGENT: &str = "my-app/0.0.1";
pub const DEFAULT_MAX_WORKERS: usize = 5;

/// Top-level configuration stored on disk.
///
/// Example TOML, every key optional:
/// ```toml
/// base_url = "https://api.flightradar24.com/common/v1/airport.json"
/// user_agent = "my-app/0.0.1"
/// max_workers = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Airport endpoint; `code` and `timestamp` are appended as query parameters.
    pub base_url: String,

    /// Sent as the `user-agent` header on every request.
    pub user_agent: String,

    /// How many airport requests may be in flight at once.
    pub max_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl Config {
    /// Load config from the platform config directory.
    ///
    /// A missing file means defaults. An unreadable or invalid one only costs a
    /// warning; the defaults are used instead.
    pub fn load_or_default() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(err) => {
                tracing::warn!(error = %err, "Config unavailable, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Self {
        let loaded = Self::load_from(path)
            .and_then(|cfg| cfg.base_url().map(|_| cfg));

        loaded.unwrap_or_else(|err| {
            tracing::warn!(
                path = %path.display(),
                error = %err,
                "Config ignored, using defaults"
            );
            Self::default()
        })
    }

    /// Load config from `path`, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "flights", "flights-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url in configuration: {}", self.base_url))
    }

    /// Concurrency bound, never below one.
    pub fn workers(&self) -> usize {
        self.max_workers.max(1)
    }
}
