//! Error types for the provider subsystem.

use thiserror::Error;

/// Errors that can occur while loading or looking up provider descriptors.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No descriptor with this name
    #[error("provider not found: {provider}")]
    NotFound {
        /// The requested provider name
        provider: String,
    },

    /// Failed to read a descriptor file
    #[error("failed to load provider descriptor from {path}: {source}")]
    LoadError {
        /// Path to the descriptor file
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON descriptor
    #[error("failed to parse provider descriptor JSON in {path}: {source}")]
    JsonParseError {
        /// Path to the descriptor file
        path: String,
        /// JSON parse error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse a TOML descriptor
    #[error("failed to parse provider descriptor TOML in {path}: {source}")]
    TomlParseError {
        /// Path to the descriptor file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Descriptor parsed but is not usable
    #[error("invalid provider descriptor for {provider}: {reason}")]
    ValidationError {
        /// Provider name being validated
        provider: String,
        /// Reason for validation failure
        reason: String,
    },

    /// Descriptor directory missing
    #[error("provider descriptor directory not found at {path}")]
    DirectoryNotFound {
        /// Expected directory path
        path: String,
    },

    /// I/O error while walking the descriptor directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Descriptor name is not a valid provider ID
    #[error("invalid provider ID: {0}")]
    InvalidId(#[from] scout_core::ScoutError),
}

impl ProviderError {
    /// Whether the error comes from a bad descriptor rather than a lookup miss.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::NotFound { .. })
    }
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
