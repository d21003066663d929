//! Scout Fetch - Provider fan-out, scraping and result normalization.
//!
//! This crate runs one search against every enabled provider at once. Each
//! provider is either scraped (search page, then one detail page per result
//! for the magnet link) or queried through a JSON API. Whatever comes back is
//! normalized into [`scout_core::Torrent`] records, merged, filtered and
//! sorted by size.
//!
//! # Features
//!
//! - One Tokio task per provider, merged through a single collector
//! - Per-provider deadline bounded by the caller's context
//! - Bounded detail-page concurrency with a randomized pause per request
//! - Release-name parsing into title, year, episode, resolution and group
//! - Failures in one provider never affect the others
//!
//! # Example
//!
//! ```rust,no_run
//! use scout_core::{FetchConfig, FetchContext, SearchRequest};
//! use scout_fetch::FetchOrchestrator;
//! use scout_provider::ProviderLoader;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let loader = ProviderLoader::new("providers")?;
//! let orchestrator = FetchOrchestrator::new(loader, FetchConfig::default())?;
//!
//! let ctx = FetchContext::with_timeout(Duration::from_secs(30));
//! let results = orchestrator
//!     .fetch_all(&ctx, &SearchRequest::new("the matrix"))
//!     .await?;
//! println!("{} results", results.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod api;
pub mod client;
#[allow(missing_docs)]
pub mod error;
pub mod filter;
pub mod magnet;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod parser;
#[allow(missing_docs)]
pub mod release;
mod scrape;
#[allow(missing_docs)]
pub mod url_builder;

// Re-export commonly used types
pub use api::ApiPayload;
pub use client::{build_http_client, ProviderClient};
pub use error::{FetchError, Result};
pub use filter::post_filter;
pub use magnet::build_magnet;
pub use orchestrator::FetchOrchestrator;
pub use parser::{parse_count, ResultParser, ScrapedItem};
pub use release::{normalize_title, parse as parse_release, ReleaseInfo};
pub use url_builder::{build_search_url, join_url};
