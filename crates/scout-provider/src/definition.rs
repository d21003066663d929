//! Provider descriptor types.
//!
//! A descriptor file is deserialized into [`ProviderDescriptor`], which
//! mirrors the on-disk keys (`searchUrl`, `itemsSelector`, ...). Validation
//! turns it into a [`ProviderConfig`] whose transport is a closed enum, so
//! selector-driven code never sees an API provider and vice versa.

use crate::error::{ProviderError, Result};
use scout_core::ProviderId;
use scraper::Selector;
use serde::{Deserialize, Serialize};

/// Placeholder substituted with the escaped query in `searchUrl`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Descriptor as written on disk (JSON or TOML).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDescriptor {
    /// Unique provider name
    pub name: String,

    /// Base URL, prefixed to relative search and detail links
    pub url: String,

    /// Search path or URL containing `{query}`
    pub search_url: String,

    /// Whether the provider takes part in fan-out searches
    #[serde(default)]
    pub enabled: bool,

    /// Transport mode
    #[serde(rename = "type")]
    pub kind: TransportKind,

    /// Log raw response bodies
    #[serde(default)]
    pub debug: bool,

    /// Selector matching one result row (scrape mode)
    #[serde(default)]
    pub item_selector: String,

    /// Per-row field selectors (scrape mode)
    #[serde(default)]
    pub items_selector: ItemSelectors,

    /// Tracker URLs appended to built magnets
    #[serde(default)]
    pub trackers: Vec<String>,
}

/// Transport mode keyword in a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Scrape an HTML results page
    Html,
    /// Query a JSON endpoint
    Api,
}

/// Field selectors relative to one result row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSelectors {
    /// Link to the detail page (`href` is read)
    #[serde(rename = "detailUrl", alias = "detail_url")]
    pub detail_url: String,

    /// Raw release name
    pub title: String,

    /// Seeder count
    pub seeds: String,

    /// Leecher count
    pub peers: String,

    /// Size text
    pub size: String,

    /// Substring a detail link must contain to be followed
    #[serde(rename = "magnetPreffixLink", alias = "magnetPrefixLink")]
    pub magnet_prefix: String,

    /// Magnet anchor on the detail page
    #[serde(rename = "magnetSelector")]
    pub magnet: String,
}

/// Selectors used by the scrape transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSelectors {
    /// One result row
    pub item: String,
    /// Fields inside a row
    pub fields: ItemSelectors,
}

/// How a provider is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    /// HTML results page plus per-item detail pages
    Scrape(ScrapeSelectors),
    /// JSON endpoint answering in one of the supported shapes
    Api,
}

/// Validated, read-only provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Unique provider name
    pub id: ProviderId,
    /// Base URL
    pub base_url: String,
    /// Search template containing `{query}`
    pub search_url: String,
    /// Fan-out participation
    pub enabled: bool,
    /// Log raw response bodies at debug level
    pub debug: bool,
    /// Transport and its selectors
    pub transport: Transport,
    /// Tracker URLs for magnet construction
    pub trackers: Vec<String>,
}

impl ProviderConfig {
    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.id.as_str()
    }

    /// Validate a descriptor and convert it.
    ///
    /// # Errors
    /// Returns `ValidationError` if required fields are empty, the search URL
    /// lacks `{query}`, or any selector fails to parse, and `InvalidId` if the
    /// name is not a valid provider ID.
    pub fn from_descriptor(descriptor: ProviderDescriptor) -> Result<Self> {
        let invalid = |reason: String| ProviderError::ValidationError {
            provider: descriptor.name.clone(),
            reason,
        };

        if descriptor.name.trim().is_empty() {
            return Err(invalid("provider name cannot be empty".to_string()));
        }

        if descriptor.url.trim().is_empty() {
            return Err(invalid("provider url cannot be empty".to_string()));
        }

        if !descriptor.search_url.contains(QUERY_PLACEHOLDER) {
            return Err(invalid(format!(
                "searchUrl must contain {QUERY_PLACEHOLDER}, got '{}'",
                descriptor.search_url
            )));
        }

        let transport = match descriptor.kind {
            TransportKind::Api => Transport::Api,
            TransportKind::Html => {
                let fields = &descriptor.items_selector;
                let required = [
                    ("itemSelector", descriptor.item_selector.as_str()),
                    ("itemsSelector.detailUrl", fields.detail_url.as_str()),
                    ("itemsSelector.title", fields.title.as_str()),
                    ("itemsSelector.magnetSelector", fields.magnet.as_str()),
                ];
                for (key, value) in required {
                    if value.trim().is_empty() {
                        return Err(invalid(format!("html provider requires {key}")));
                    }
                }

                let css = [
                    ("itemSelector", descriptor.item_selector.as_str()),
                    ("itemsSelector.detailUrl", fields.detail_url.as_str()),
                    ("itemsSelector.title", fields.title.as_str()),
                    ("itemsSelector.seeds", fields.seeds.as_str()),
                    ("itemsSelector.peers", fields.peers.as_str()),
                    ("itemsSelector.size", fields.size.as_str()),
                    ("itemsSelector.magnetSelector", fields.magnet.as_str()),
                ];
                for (key, value) in css {
                    if value.is_empty() {
                        continue;
                    }
                    if let Err(e) = Selector::parse(value) {
                        return Err(invalid(format!("{key} '{value}' is not valid CSS: {e}")));
                    }
                }

                Transport::Scrape(ScrapeSelectors {
                    item: descriptor.item_selector.clone(),
                    fields: descriptor.items_selector.clone(),
                })
            }
        };

        let id = ProviderId::new(descriptor.name.trim())?;

        Ok(Self {
            id,
            base_url: descriptor.url,
            search_url: descriptor.search_url,
            enabled: descriptor.enabled,
            debug: descriptor.debug,
            transport,
            trackers: descriptor.trackers,
        })
    }
}

impl TryFrom<ProviderDescriptor> for ProviderConfig {
    type Error = ProviderError;

    fn try_from(descriptor: ProviderDescriptor) -> Result<Self> {
        Self::from_descriptor(descriptor)
    }
}
