//! JSON API transport.
//!
//! Two payload shapes are understood, tried in this order:
//!
//! - a flat list of items, each with a release name, info hash, string
//!   counts and a byte size;
//! - a movie catalog (`data.movies[]`), each title embedding one torrent per
//!   quality variant.
//!
//! Anything else is a [`FetchError::Format`] for the provider.

use crate::client::{get_body, record_from_release};
use crate::error::{FetchError, Result};
use crate::magnet::{build_magnet, is_null_hash};
use crate::release;
use crate::url_builder::build_search_url;
use reqwest::Client;
use scout_core::{format_size, normalize_size, parse_size, ContentType, FetchContext, Torrent};
use scout_provider::ProviderConfig;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Group reported for every catalog record.
pub const CATALOG_GROUP: &str = "yts";

/// Decoded API response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiPayload {
    FlatList(Vec<FlatListItem>),
    Catalog(CatalogResponse),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FlatListItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub info_hash: String,
    #[serde(deserialize_with = "string_or_number")]
    pub seeders: String,
    #[serde(deserialize_with = "string_or_number")]
    pub leechers: String,
    #[serde(deserialize_with = "string_or_number")]
    pub num_files: String,
    #[serde(deserialize_with = "string_or_number")]
    pub size: String,
    pub username: String,
    pub status: String,
    #[serde(deserialize_with = "string_or_number")]
    pub category: String,
    pub imdb: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    pub data: CatalogData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub movie_count: u32,
    pub movies: Vec<CatalogMovie>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogMovie {
    pub title: String,
    pub title_english: String,
    pub year: u32,
    pub torrents: Vec<CatalogTorrent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogTorrent {
    pub hash: String,
    pub quality: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub video_codec: String,
    pub seeds: u32,
    pub peers: u32,
    pub size: String,
    pub size_bytes: u64,
}

impl ApiPayload {
    /// Decode a response body, flat list first, then catalog.
    pub fn decode(body: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(body)
            .map_err(|_| "body matches neither the flat-list nor the catalog shape".to_string())
    }

    /// Convert into canonical records for `config`.
    #[must_use]
    pub fn normalize(self, config: &ProviderConfig) -> Vec<Torrent> {
        match self {
            Self::FlatList(items) => items
                .into_iter()
                .filter_map(|item| normalize_flat_item(config, item))
                .collect(),
            Self::Catalog(catalog) => catalog
                .data
                .movies
                .into_iter()
                .flat_map(|movie| normalize_catalog_movie(config, movie))
                .collect(),
        }
    }
}

fn normalize_flat_item(config: &ProviderConfig, item: FlatListItem) -> Option<Torrent> {
    if is_null_hash(&item.info_hash) {
        return None;
    }

    let info = release::parse(&item.name);
    if info.title.is_empty() {
        return None;
    }

    let content_type = if info.season == 0 {
        ContentType::Movie
    } else {
        ContentType::Serie
    };

    let mut torrent = record_from_release(config, &item.name, info, content_type);
    torrent.seeds = item.seeders.trim().parse().unwrap_or(0);
    torrent.peers = item.leechers.trim().parse().unwrap_or(0);
    torrent.size = normalize_size(&item.size);
    torrent.magnet = build_magnet(&item.info_hash, &item.name, &config.trackers);
    Some(torrent)
}

fn normalize_catalog_movie(config: &ProviderConfig, movie: CatalogMovie) -> Vec<Torrent> {
    let title = if movie.title_english.trim().is_empty() {
        movie.title.clone()
    } else {
        movie.title_english.clone()
    };

    movie
        .torrents
        .into_iter()
        .map(|variant| {
            let size = if parse_size(&variant.size).is_some() {
                variant.size.trim().to_string()
            } else {
                format_size(variant.size_bytes)
            };

            Torrent {
                provider: config.name().to_string(),
                content_type: ContentType::Movie,
                title: title.clone(),
                original_title: movie.title.clone(),
                year: movie.year,
                group: CATALOG_GROUP.to_string(),
                resolution: variant.quality,
                codec: variant.video_codec,
                quality: variant.kind,
                seeds: variant.seeds,
                peers: variant.peers,
                size,
                season: 0,
                episode: 0,
                magnet: build_magnet(&variant.hash, &movie.title, &config.trackers),
            }
        })
        .collect()
}

/// Accept `"12"` or `12` (or `null`) for fields some APIs send either way.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

pub(crate) struct ApiTransport<'a> {
    http: &'a Client,
}

impl<'a> ApiTransport<'a> {
    pub(crate) fn new(http: &'a Client) -> Self {
        Self { http }
    }

    pub(crate) async fn fetch(
        &self,
        ctx: &FetchContext,
        config: &ProviderConfig,
        query: &str,
    ) -> Result<Vec<Torrent>> {
        let url = build_search_url(config, query)?;
        debug!(provider = %config.id, url = %url, "querying API");

        let body = get_body(self.http, ctx, &config.id, &url, true).await?;
        if config.debug {
            debug!(provider = %config.id, body = %body, "raw API response");
        }

        let payload = ApiPayload::decode(&body).map_err(|reason| FetchError::Format {
            provider: config.id.clone(),
            reason,
        })?;

        Ok(payload.normalize(config))
    }
}
