//! Configuration management for Scout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/scout/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where provider descriptors live
    pub providers: ProvidersConfig,
    /// Fetch and scrape behaviour
    pub fetch: FetchConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path, falling back to defaults if
    /// the file doesn't exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SCOUT_PROVIDERS_DIR`: Override the provider descriptor directory
    /// - `SCOUT_PROVIDER_TIMEOUT_SECS`: Override the per-provider timeout
    /// - `SCOUT_DETAIL_CONCURRENCY`: Override concurrent detail-page fetches
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `SCOUT_*` environment overrides in place.
    ///
    /// Values that fail to parse are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SCOUT_PROVIDERS_DIR") {
            if !val.is_empty() {
                tracing::debug!("Override providers.dir from env: {}", val);
                self.providers.dir = PathBuf::from(val);
            }
        }

        if let Ok(val) = std::env::var("SCOUT_PROVIDER_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.fetch.provider_timeout_secs = secs;
                tracing::debug!("Override fetch.provider_timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("SCOUT_DETAIL_CONCURRENCY") {
            if let Ok(limit) = val.parse() {
                self.fetch.detail_concurrency = limit;
                tracing::debug!("Override fetch.detail_concurrency from env: {}", limit);
            }
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fetch.detail_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.detail_concurrency".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if self.fetch.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "fetch.provider_timeout_secs".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/scout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "scout", "scout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Provider descriptor location.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Directory scanned (recursively) for `*.json` / `*.toml` descriptors
    pub dir: PathBuf,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("providers"),
        }
    }
}

/// Fetch behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Timeout for a single HTTP request in seconds
    pub request_timeout_secs: u64,
    /// Upper bound for one provider's whole contribution in seconds
    pub provider_timeout_secs: u64,
    /// Concurrent detail-page fetches per scrape provider
    pub detail_concurrency: usize,
    /// Upper bound of the random delay before each detail fetch, in milliseconds
    pub detail_delay_max_ms: u64,
    /// User agent string
    pub user_agent: String,
}

impl FetchConfig {
    /// Per-request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Per-provider timeout as a `Duration`.
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Maximum random delay between detail fetches.
    #[must_use]
    pub fn detail_delay_max(&self) -> Duration {
        Duration::from_millis(self.detail_delay_max_ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 15,
            provider_timeout_secs: 30,
            detail_concurrency: 2,
            detail_delay_max_ms: 5000,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.providers.dir, PathBuf::from("providers"));
        assert_eq!(config.fetch.detail_concurrency, 2);
        assert_eq!(config.fetch.detail_delay_max(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let config =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load defaults");
        assert_eq!(config.fetch.provider_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[providers]
dir = "/srv/scout/providers"

[fetch]
provider_timeout_secs = 8
detail_delay_max_ms = 0
"#,
        )
        .expect("write config file");

        let config = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(config.providers.dir, PathBuf::from("/srv/scout/providers"));
        assert_eq!(config.fetch.provider_timeout(), Duration::from_secs(8));
        assert_eq!(config.fetch.detail_delay_max(), Duration::ZERO);
        // Untouched fields keep their defaults
        assert_eq!(config.fetch.detail_concurrency, 2);
        assert_eq!(config.fetch.request_timeout_secs, 15);
    }

    #[test]
    fn test_load_rejects_zero_concurrency() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[fetch]\ndetail_concurrency = 0\n").expect("write config");

        let result = AppConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");
        fs::write(&config_path, "[fetch\n").expect("write config");

        let result = AppConfig::load_from(&config_path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SCOUT_PROVIDERS_DIR", "/tmp/scout-providers");
        std::env::set_var("SCOUT_PROVIDER_TIMEOUT_SECS", "12");
        std::env::set_var("SCOUT_DETAIL_CONCURRENCY", "not-a-number");

        let mut config = AppConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.providers.dir, PathBuf::from("/tmp/scout-providers"));
        assert_eq!(config.fetch.provider_timeout_secs, 12);
        assert_eq!(config.fetch.detail_concurrency, 2);

        std::env::remove_var("SCOUT_PROVIDERS_DIR");
        std::env::remove_var("SCOUT_PROVIDER_TIMEOUT_SECS");
        std::env::remove_var("SCOUT_DETAIL_CONCURRENCY");
    }
}
