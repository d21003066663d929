//! Scout Core - Foundation crate for the Scout torrent search aggregator.
//!
//! This crate provides shared types, error handling, configuration management
//! and the cancellation context that the other Scout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and records (`ProviderId`, `Torrent`, `SearchRequest`)
//! - [`size`] - Human-readable size parsing and formatting
//! - [`context`] - Cancellation token plus deadline for in-flight fetches
//!
//! # Example
//!
//! ```rust
//! use scout_core::{format_size, parse_size, AppConfig, SearchRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//! assert_eq!(config.fetch.detail_concurrency, 2);
//!
//! let request = SearchRequest::new("the matrix");
//! request.validate()?;
//!
//! assert_eq!(parse_size(&format_size(1024)), Some(1024));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod context;
pub mod error;
pub mod size;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, FetchConfig, ProvidersConfig};
pub use context::{FetchContext, Interrupted};
pub use error::{ConfigError, ConfigResult, Result, ScoutError};
pub use size::{format_size, normalize_size, parse_size, GB, KB, MB};
pub use types::{ContentType, ProviderId, SearchFilters, SearchRequest, SearchResponse, Torrent};
