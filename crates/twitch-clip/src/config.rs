use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "twitch-clip";
const CONFIG_FILE: &str = "config.json";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Upper bound for a single request, connect through body read
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,
    /// Scope requested on token refresh; `null` leaves it off the request
    #[serde(default = "default_refresh_scope")]
    pub refresh_scope: Option<String>,
}

fn default_request_timeout() -> u64 {
    10
}

fn default_refresh_scope() -> Option<String> {
    Some("clips:edit".to_string())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            request_timeout_sec: default_request_timeout(),
            refresh_scope: default_refresh_scope(),
        }
    }
}

impl Config {
    /// Loads the config file from the user's config directory, if there is one
    pub fn load() -> Result<Self> {
        let config_file = Self::config_dir()?.join(CONFIG_FILE);

        if config_file.exists() {
            Self::from_file(&config_file)
        } else {
            tracing::debug!("No config at {}, using defaults", config_file.display());
            Ok(Self::default())
        }
    }

    /// Reads configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&data).context("Failed to parse config file")
    }

    /// Returns the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not determine config directory")?
            .join(APP_NAME))
    }

    /// Request timeout as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_sec)
    }
}
