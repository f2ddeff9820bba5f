use anyhow::{Context, Result};
use deskmem_api::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT};
use deskmem_api::ApiConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "deskmem-tui";

/// Overrides `api_url` from the config file.
pub const API_URL_ENV: &str = "DESKMEM_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Base URL of the backend API, e.g. "http://localhost:8000/api"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How often the dashboard reloads while it is on screen.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Screenshots per timeline page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_refresh_interval_secs() -> u64 {
    60
}

fn default_search_limit() -> u32 {
    20
}

fn default_page_size() -> u32 {
    20
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            refresh_interval_secs: default_refresh_interval_secs(),
            search_limit: default_search_limit(),
            page_size: default_page_size(),
        }
    }
}

pub fn app_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join(APP_DIR))
}

impl TuiConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(app_dir()?.join("config.toml"))
    }

    pub fn log_dir() -> Result<PathBuf> {
        Ok(app_dir()?.join("logs"))
    }

    /// Load config from disk and apply the environment override. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_override(std::env::var(API_URL_ENV).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    fn apply_env_override(&mut self, api_url: Option<String>) {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(&self.api_url).with_timeout(Duration::from_secs(self.request_timeout_secs))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = TuiConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, TuiConfig::default());
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://mem.example.com/api\"\npage_size = 50\n")
            .unwrap();

        let config = TuiConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://mem.example.com/api");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.search_limit, 20);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = TuiConfig {
            refresh_interval_secs: 15,
            ..TuiConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(TuiConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn env_override_replaces_url_unless_blank() {
        let mut config = TuiConfig::default();
        config.apply_env_override(Some("  ".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);

        config.apply_env_override(Some("http://10.0.0.5:8000/api".to_string()));
        assert_eq!(config.api_url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn api_config_carries_timeout() {
        let config = TuiConfig {
            request_timeout_secs: 5,
            ..TuiConfig::default()
        };
        assert_eq!(config.api_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "page_size = \"many\"").unwrap();
        assert!(TuiConfig::load_from(&path).is_err());
    }
}
