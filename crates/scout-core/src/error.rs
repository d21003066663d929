//! Core error types for the Scout workspace.
//!
//! This module defines the central error type shared by the subsystems plus
//! the configuration-specific errors raised while loading `AppConfig`.

use thiserror::Error;

/// Central error type for Scout operations.
///
/// Subsystem crates define their own richer errors; this type carries the
/// cases that are meaningful across crate boundaries.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid input, constraints)
    #[error("validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// I/O error reading config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `ScoutError`.
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScoutError::Validation("query cannot be empty".to_string());
        assert_eq!(err.to_string(), "validation error: query cannot be empty");

        let err = ConfigError::NoConfigDir;
        assert_eq!(
            err.to_string(),
            "could not determine config directory (XDG base directories not available)"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::InvalidValue {
            field: "fetch.detail_concurrency".to_string(),
            reason: "must be at least 1".to_string(),
        };
        let scout_err: ScoutError = config_err.into();
        assert!(matches!(scout_err, ScoutError::Config(_)));
        assert!(scout_err.to_string().contains("detail_concurrency"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let scout_err: ScoutError = io_err.into();
        assert!(matches!(scout_err, ScoutError::Io(_)));
    }
}
