//! HTML scrape transport.
//!
//! The search page yields rows; each row whose detail link carries the
//! provider's magnet marker is followed to its detail page to resolve the
//! magnet. Detail fetches run `detail_concurrency` at a time, each after a
//! random pause, and the single consumer of that stream deduplicates by raw
//! release name.

use crate::client::{get_body, record_from_release};
use crate::error::Result;
use crate::parser::{parse_count, ResultParser, ScrapedItem};
use crate::release;
use crate::url_builder::{build_search_url, join_url};
use futures::stream::{self, StreamExt};
use rand::Rng;
use reqwest::Client;
use scout_core::{ContentType, FetchConfig, FetchContext, Torrent};
use scout_provider::{ProviderConfig, ScrapeSelectors};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, warn};

pub(crate) struct ScrapeTransport<'a> {
    http: &'a Client,
    settings: &'a FetchConfig,
}

impl<'a> ScrapeTransport<'a> {
    pub(crate) fn new(http: &'a Client, settings: &'a FetchConfig) -> Self {
        Self { http, settings }
    }

    pub(crate) async fn fetch(
        &self,
        ctx: &FetchContext,
        config: &ProviderConfig,
        selectors: &ScrapeSelectors,
        query: &str,
    ) -> Result<Vec<Torrent>> {
        let parser = ResultParser::new(&config.id, selectors)?;
        let url = build_search_url(config, query)?;
        debug!(provider = %config.id, url = %url, "scraping search page");

        let body = get_body(self.http, ctx, &config.id, &url, false).await?;
        if config.debug {
            debug!(provider = %config.id, body = %body, "raw search page");
        }

        let items = parser.parse_results(&body);
        let marker = selectors.fields.magnet_prefix.as_str();

        let candidates: Vec<(Torrent, String)> = items
            .into_iter()
            .filter(|item| item.detail_url.contains(marker))
            .map(|item| {
                let detail_url = join_url(&config.base_url, &item.detail_url);
                (normalize_item(config, &item), detail_url)
            })
            .collect();

        debug!(
            provider = %config.id,
            candidates = candidates.len(),
            "following detail links"
        );

        let parser = &parser;
        let mut resolved = stream::iter(candidates)
            .map(|(torrent, detail_url)| async move {
                self.resolve_magnet(ctx, config, parser, torrent, &detail_url)
                    .await
            })
            .buffer_unordered(self.settings.detail_concurrency.max(1));

        let mut seen = HashSet::new();
        let mut torrents = Vec::new();
        while let Some(item) = resolved.next().await {
            if let Some(torrent) = item {
                if seen.insert(torrent.original_title.clone()) {
                    torrents.push(torrent);
                }
            }
        }

        Ok(torrents)
    }

    async fn resolve_magnet(
        &self,
        ctx: &FetchContext,
        config: &ProviderConfig,
        parser: &ResultParser,
        mut torrent: Torrent,
        detail_url: &str,
    ) -> Option<Torrent> {
        let delay = random_delay(self.settings.detail_delay_max());
        if ctx.run(tokio::time::sleep(delay)).await.is_err() {
            return None;
        }

        let body = match get_body(self.http, ctx, &config.id, detail_url, false).await {
            Ok(body) => body,
            Err(e) => {
                warn!(provider = %config.id, url = detail_url, error = %e, "detail fetch failed");
                return None;
            }
        };

        if let Some(magnet) = parser.parse_magnet(&body) {
            torrent.magnet = magnet;
            Some(torrent)
        } else {
            debug!(provider = %config.id, url = detail_url, "no magnet on detail page");
            None
        }
    }
}

/// Canonical record for a scraped row, before magnet resolution.
fn normalize_item(config: &ProviderConfig, item: &ScrapedItem) -> Torrent {
    let info = release::parse(&item.title);
    let content_type = if info.episode == 0 {
        ContentType::Movie
    } else {
        ContentType::Serie
    };

    let mut torrent = record_from_release(config, &item.title, info, content_type);
    torrent.seeds = parse_count(&item.seeds);
    torrent.peers = parse_count(&item.peers);
    torrent.size.clone_from(&item.size);
    torrent
}

fn random_delay(max: Duration) -> Duration {
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}
