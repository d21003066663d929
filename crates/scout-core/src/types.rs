//! Shared types used across the Scout workspace.
//!
//! This module defines the provider identity newtype, the search request
//! handed in by callers and the canonical `Torrent` record handed back.

use crate::error::ScoutError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for provider identifiers with validation.
///
/// Provider IDs are 1-50 characters of ASCII letters, digits, `.`, `_` or
/// `-`, starting with a letter or digit (e.g. `tpb`, `yts`, `1337x`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a new `ProviderId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, ScoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> Result<(), ScoutError> {
        static PROVIDER_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PROVIDER_REGEX
            .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid regex"));

        if id.is_empty() || id.len() > 50 {
            return Err(ScoutError::Validation(format!(
                "invalid provider ID: must be 1-50 characters, got {} characters",
                id.len()
            )));
        }

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(ScoutError::Validation(format!(
                "invalid provider ID: must be alphanumeric with '.', '_' or '-', got '{id}'"
            )))
        }
    }
}

impl TryFrom<String> for ProviderId {
    type Error = ScoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        id.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of content a torrent carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A feature film
    Movie,
    /// An episode (or season pack) of a TV series
    Serie,
}

impl ContentType {
    /// Wire name of the content type.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Serie => "serie",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical search result, identical for every provider regardless of
/// the shape the provider answered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    /// Name of the provider that produced the record
    pub provider: String,
    /// Movie or series episode
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Normalized title (separators replaced, brackets stripped)
    pub title: String,
    /// Raw release name as published by the provider
    pub original_title: String,
    /// Release year, 0 when unknown
    pub year: u32,
    /// Release group, lowercased
    pub group: String,
    /// Resolution tag such as `1080p`
    pub resolution: String,
    /// Video codec such as `x264`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub codec: String,
    /// Source quality tag such as `BluRay`
    pub quality: String,
    /// Seeders reported by the provider
    pub seeds: u32,
    /// Leechers reported by the provider
    pub peers: u32,
    /// Human-readable size (`"1.40 GB"`)
    pub size: String,
    /// Season number, 0 when not a series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub season: u32,
    /// Episode number, 0 when not a series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub episode: u32,
    /// `magnet:` URI
    pub magnet: String,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &u32) -> bool {
    *value == 0
}

/// User-supplied filters applied after all providers answered.
///
/// Empty strings and zero numbers mean "unconstrained".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Exact (normalized, case-insensitive) title
    pub title: String,
    /// Substring of the release group or the original title
    pub group: String,
    /// Substring of the resolution tag
    pub resolution: String,
    /// Required season for series, 0 for any
    pub season: u32,
    /// Required episode for series, 0 for any
    pub episode: u32,
}

/// Query plus filters, as handed to the fetch orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query, substituted into each provider's search URL
    pub query: String,
    /// Post-fetch filters
    #[serde(default)]
    pub filters: SearchFilters,
}

impl SearchRequest {
    /// Create an unfiltered request.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            filters: SearchFilters::default(),
        }
    }

    /// Replace the filter set.
    #[must_use]
    pub fn with_filters(mut self, filters: SearchFilters) -> Self {
        self.filters = filters;
        self
    }

    /// Ensure the request can be sent to providers.
    ///
    /// # Errors
    /// Returns error if the query is empty or whitespace only.
    pub fn validate(&self) -> Result<(), ScoutError> {
        if self.query.trim().is_empty() {
            return Err(ScoutError::Validation("search query cannot be empty".to_string()));
        }
        Ok(())
    }
}

/// Envelope serialized by the surrounding request layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "lowercase")]
pub enum SearchResponse {
    /// Successful search
    Ok {
        /// Number of records in `data`
        total: usize,
        /// Filtered, size-sorted records
        data: Vec<Torrent>,
    },
    /// Request-level failure
    Error {
        /// Human-readable error
        error: String,
    },
}

impl SearchResponse {
    /// Wrap a result list.
    #[must_use]
    pub fn ok(data: Vec<Torrent>) -> Self {
        Self::Ok {
            total: data.len(),
            data,
        }
    }

    /// Wrap a request-level error.
    pub fn error(error: impl fmt::Display) -> Self {
        Self::Error {
            error: error.to_string(),
        }
    }
}
