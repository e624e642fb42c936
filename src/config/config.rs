use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::data::paginator::DEFAULT_PAGE_SIZE;
use crate::error::ConfigError;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "OPPORTUNITY_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Use Unicode check boxes for the selection column
    pub use_glyphs: bool,

    /// Show "21–40 of 57" under the table
    pub show_range_label: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Rows per page
    pub page_size: usize,

    /// Ask the fetch service again on every search key change, as well as
    /// filtering locally
    pub refetch_on_search: bool,

    /// Controller events kept for debugging
    pub max_event_history: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,

    /// Path of the record listing endpoint; receives `searchKey`
    pub fetch_path: String,

    /// Path of the row action endpoint; `{id}` is replaced by the record id
    pub action_path: String,

    /// Request timeout enforced by the HTTP client
    pub timeout_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            use_glyphs: true,
            show_range_label: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refetch_on_search: false,
            max_event_history: 100,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            fetch_path: "/api/opportunities".to_string(),
            action_path: "/api/opportunities/{id}/api".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load config from the default location, creating it if missing
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config.with_env_overrides());
        }

        Ok(Self::load_from(&config_path)?.with_env_overrides())
    }

    /// Load and validate a config file at an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        debug!(target: "config", "Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("opportunity-search").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.behavior.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !self.api.action_path.contains("{id}") {
            return Err(ConfigError::MissingIdPlaceholder);
        }
        Ok(())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
        self
    }

    /// Create a default config file with comments
    pub fn create_default_with_comments() -> String {
        r#"# Opportunity Search Configuration File
# Location: ~/.config/opportunity-search/config.toml (Linux)
#           ~/Library/Application Support/opportunity-search/config.toml (macOS)
#           %APPDATA%\opportunity-search\config.toml (Windows)

[display]
# Use Unicode check boxes in the selection column
# Set to false for ASCII-only mode ([x] / [ ])
use_glyphs = true

# Show the "21–40 of 57" range label under each page
show_range_label = true

[behavior]
# Rows per page (must be at least 1)
page_size = 20

# Re-query the service on every search key change instead of only
# filtering the records already loaded
refetch_on_search = false

# Number of controller events kept for debugging
max_event_history = 100

[api]
# Base URL of the opportunity service (OPPORTUNITY_API_URL overrides this)
base_url = "http://localhost:5000"

# Listing endpoint, called with ?searchKey=<query>
fetch_path = "/api/opportunities"

# Row action endpoint; {id} is replaced with the opportunity id
action_path = "/api/opportunities/{id}/api"

# HTTP request timeout in seconds
timeout_secs = 30
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.behavior.page_size, 20);
        assert!(!config.behavior.refetch_on_search);
        assert!(config.display.use_glyphs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.behavior.page_size, parsed.behavior.page_size);
        assert_eq!(config.api.action_path, parsed.api.action_path);
    }

    #[test]
    fn test_commented_default_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::create_default_with_comments()).unwrap();
        let defaults = Config::default();
        assert_eq!(parsed.behavior.page_size, defaults.behavior.page_size);
        assert_eq!(parsed.api.base_url, defaults.api.base_url);
        assert_eq!(parsed.api.timeout_secs, defaults.api.timeout_secs);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[behavior]\npage_size = 5\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.behavior.page_size, 5);
        assert_eq!(config.api.fetch_path, "/api/opportunities");
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[behavior]\npage_size = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::ZeroPageSize)
        );
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.behavior.page_size = 50;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap().behavior.page_size, 50);
    }

    #[test]
    fn test_action_path_requires_placeholder() {
        let mut config = Config::default();
        config.api.action_path = "/api/run".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingIdPlaceholder));
    }
}
