//! Per-provider fetch dispatch.
//!
//! A [`ProviderClient`] wraps one provider's config and routes the search
//! to the scrape or API transport. Both transports share the HTTP helper
//! and the release-to-record conversion defined here.

use crate::api::ApiTransport;
use crate::error::{FetchError, Result};
use crate::release::{self, ReleaseInfo};
use crate::scrape::ScrapeTransport;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use scout_core::{ContentType, FetchConfig, FetchContext, ProviderId, SearchRequest, Torrent};
use scout_provider::{ProviderConfig, Transport};
use std::sync::Arc;
use tracing::{debug, info};

/// Build the HTTP client shared by every provider fetch.
pub fn build_http_client(config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// Fetches and normalizes results for one provider.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    config: Arc<ProviderConfig>,
    http: Client,
    settings: FetchConfig,
}

impl ProviderClient {
    /// Create a client for one provider.
    #[must_use]
    pub fn new(config: Arc<ProviderConfig>, http: Client, settings: FetchConfig) -> Self {
        Self {
            config,
            http,
            settings,
        }
    }

    /// Query the provider and convert its answer into canonical records.
    ///
    /// Every network wait is bounded by `ctx`.
    pub async fn fetch_and_normalize(
        &self,
        ctx: &FetchContext,
        request: &SearchRequest,
    ) -> Result<Vec<Torrent>> {
        let torrents = match &self.config.transport {
            Transport::Scrape(selectors) => {
                ScrapeTransport::new(&self.http, &self.settings)
                    .fetch(ctx, &self.config, selectors, &request.query)
                    .await?
            }
            Transport::Api => {
                ApiTransport::new(&self.http)
                    .fetch(ctx, &self.config, &request.query)
                    .await?
            }
        };

        info!(
            provider = %self.config.id,
            count = torrents.len(),
            "provider returned results"
        );

        Ok(torrents)
    }
}

/// GET `url` and return the body, racing every wait against `ctx`.
///
/// Non-success statuses are errors.
pub(crate) async fn get_body(
    http: &Client,
    ctx: &FetchContext,
    provider: &ProviderId,
    url: &str,
    json: bool,
) -> Result<String> {
    let mut request = http.get(url);
    if json {
        request = request.header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let response = ctx
        .run(request.send())
        .await
        .map_err(|reason| FetchError::interrupted(provider, reason))?
        .map_err(|e| FetchError::transport(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            provider: provider.clone(),
            status: status.as_u16(),
        });
    }

    let body = ctx
        .run(response.text())
        .await
        .map_err(|reason| FetchError::interrupted(provider, reason))?
        .map_err(|e| FetchError::transport(provider, e))?;

    debug!(provider = %provider, url, bytes = body.len(), "fetched page");
    Ok(body)
}

/// Canonical record for a parsed release, without magnet.
pub(crate) fn record_from_release(
    provider: &ProviderConfig,
    raw_title: &str,
    info: ReleaseInfo,
    content_type: ContentType,
) -> Torrent {
    Torrent {
        provider: provider.name().to_string(),
        content_type,
        title: release::normalize_title(&info.title),
        original_title: raw_title.to_string(),
        year: info.year,
        group: info.group.to_lowercase(),
        resolution: info.resolution,
        codec: info.codec,
        quality: info.quality,
        seeds: 0,
        peers: 0,
        size: String::new(),
        season: info.season,
        episode: info.episode,
        magnet: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ProviderConfig {
        ProviderConfig {
            id: ProviderId::new("tpb").expect("valid provider ID"),
            base_url: "https://tpb.example".to_string(),
            search_url: "/q.php?q={query}".to_string(),
            enabled: true,
            debug: false,
            transport: Transport::Api,
            trackers: Vec::new(),
        }
    }

    #[test]
    fn test_record_from_release() {
        let raw = "Some-Movie.(2020).1080p.WEBRip.x265-TEAM";
        let record = record_from_release(&provider(), raw, release::parse(raw), ContentType::Movie);

        assert_eq!(record.provider, "tpb");
        assert_eq!(record.title, "Some Movie");
        assert_eq!(record.original_title, raw);
        assert_eq!(record.year, 2020);
        assert_eq!(record.group, "team");
        assert_eq!(record.quality, "WEBRip");
        assert_eq!(record.codec, "x265");
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&FetchConfig::default()).is_ok());
    }
}
