//! Scout Provider - Descriptor system for torrent search providers.
//!
//! Each provider is described by one JSON or TOML file: its name, base URL,
//! search template, transport mode, scrape selectors and tracker list. This
//! crate loads those files, validates them and caches them in memory.
//!
//! # Architecture
//!
//! - **Definition Types** ([`definition`]): On-disk descriptor and the validated config
//! - **Loader** ([`loader`]): Recursive JSON/TOML loading from the providers directory
//! - **Registry** ([`registry`]): Name-sorted snapshot with active filtering
//! - **Errors** ([`error`]): Provider-specific error types
//!
//! # Example
//!
//! ```rust,no_run
//! use scout_provider::{ProviderLoader, ProviderRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = ProviderLoader::new("providers")?;
//! let registry = ProviderRegistry::load_from(&loader)?;
//!
//! for provider in registry.active_only() {
//!     println!("{} ({})", provider.name(), provider.base_url);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod definition;
pub mod error;
pub mod loader;
pub mod registry;

// Re-export commonly used types
pub use definition::{
    ItemSelectors, ProviderConfig, ProviderDescriptor, ScrapeSelectors, Transport, TransportKind,
    QUERY_PLACEHOLDER,
};
pub use error::{ProviderError, Result};
pub use loader::ProviderLoader;
pub use registry::ProviderRegistry;
