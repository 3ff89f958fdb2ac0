//! @acp:module "Configuration"
//! @acp:summary "Config file loading and defaults"
//! @acp:domain cli
//! @acp:layer config
//!
//! Config file loading and defaults, plus the environment flags read at
//! startup.

pub mod env;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use env::RuntimeFlags;

use crate::error::SetupError;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".nx-setup.json";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Usage stats submission
    #[serde(default)]
    pub stats: StatsConfig,
}

impl Config {
    /// Load config from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate().map_err(|reason| {
            SetupError::Config(format!("{}: {}", path.display(), reason))
        })?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the first existing default location, or use defaults
    pub fn load_or_default() -> Self {
        for path in Self::default_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring config {}: {}", path.display(), e),
            }
        }
        Self::default()
    }

    /// Candidate config locations, most specific first
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("nx-setup").join("config.json"));
        }
        paths
    }

    fn validate(&self) -> Result<(), String> {
        if self.stats.min_major > self.stats.max_major {
            return Err(format!(
                "stats.minMajor ({}) is greater than stats.maxMajor ({})",
                self.stats.min_major, self.stats.max_major
            ));
        }
        Ok(())
    }
}

/// Stats collector settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsConfig {
    /// Send stats at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Collector origin
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collector path, appended to `base_url`
    #[serde(default = "default_path")]
    pub path: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Lowest major version that reports (inclusive)
    #[serde(default = "default_min_major")]
    pub min_major: u64,

    /// Highest major version that reports (inclusive)
    #[serde(default = "default_max_major")]
    pub max_major: u64,

    /// Version reported in place of the crate version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            path: default_path(),
            timeout_ms: default_timeout_ms(),
            min_major: default_min_major(),
            max_major: default_max_major(),
            version: None,
        }
    }
}

impl StatsConfig {
    /// Full collector URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path.trim_start_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Version string to report
    pub fn reported_version(&self) -> &str {
        self.version.as_deref().unwrap_or(crate::VERSION)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://cloud.nx.app".to_string()
}

fn default_path() -> String {
    "/nx-cloud/stats".to_string()
}

fn default_timeout_ms() -> u64 {
    400
}

fn default_min_major() -> u64 {
    10
}

fn default_max_major() -> u64 {
    16
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let stats = StatsConfig::default();
        assert_eq!(stats.endpoint(), "https://cloud.nx.app/nx-cloud/stats");
        assert_eq!(stats.timeout(), Duration::from_millis(400));
        assert_eq!((stats.min_major, stats.max_major), (10, 16));
        assert_eq!(stats.reported_version(), crate::VERSION);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(
            &path,
            r#"{ "stats": { "baseUrl": "http://localhost:4200/", "version": "14.2.0" } }"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.stats.endpoint(), "http://localhost:4200/nx-cloud/stats");
        assert_eq!(config.stats.reported_version(), "14.2.0");
        assert!(config.stats.enabled);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::default();
        config.stats.enabled = false;
        config.stats.timeout_ms = 150;

        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "stats": { "minMajor": 17, "maxMajor": 16 } }"#).unwrap();

        assert!(matches!(Config::load(&path), Err(SetupError::Config(_))));
    }
}
