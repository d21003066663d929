//! Fetch orchestrator for fanning a search out across providers.
//!
//! This module provides the `FetchOrchestrator`, which loads the provider
//! descriptors, runs one task per provider, merges what they return and
//! applies the post-filter.

use crate::client::{build_http_client, ProviderClient};
use crate::error::{FetchError, Result};
use crate::filter::post_filter;
use reqwest::Client;
use scout_core::{FetchConfig, FetchContext, SearchRequest, Torrent};
use scout_provider::{ProviderConfig, ProviderLoader, ProviderRegistry};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{error, info, info_span, warn, Instrument};

/// Orchestrates searches across every configured provider.
pub struct FetchOrchestrator {
    /// Descriptor source, read afresh on every search
    loader: ProviderLoader,
    /// HTTP client shared by all provider tasks
    http: Client,
    /// Timeouts, concurrency limits and user agent
    settings: FetchConfig,
}

impl FetchOrchestrator {
    /// Create a new orchestrator.
    pub fn new(loader: ProviderLoader, settings: FetchConfig) -> Result<Self> {
        let http = build_http_client(&settings)?;
        Ok(Self {
            loader,
            http,
            settings,
        })
    }

    /// Search every enabled provider.
    ///
    /// Provider failures are logged and contribute nothing; only an invalid
    /// request or a broken descriptor directory fail the call.
    pub async fn fetch_all(
        &self,
        ctx: &FetchContext,
        request: &SearchRequest,
    ) -> Result<Vec<Torrent>> {
        Self::validate(request)?;

        let registry = ProviderRegistry::load_from(&self.loader)?;
        let providers = registry.active_only();

        info!(
            providers = providers.len(),
            query = %request.query,
            "searching active providers"
        );

        let merged = self.run_providers(ctx, providers, request).await?;
        Ok(post_filter(merged, &request.filters))
    }

    /// Search a single provider by name, enabled or not.
    ///
    /// Returns `FetchError::Provider(NotFound)` for unknown names.
    pub async fn fetch_by_provider(
        &self,
        ctx: &FetchContext,
        name: &str,
        request: &SearchRequest,
    ) -> Result<Vec<Torrent>> {
        Self::validate(request)?;

        let config = self.loader.load(name)?;
        info!(provider = %config.id, query = %request.query, "searching single provider");

        let merged = self
            .run_providers(ctx, vec![Arc::new(config)], request)
            .await?;
        Ok(post_filter(merged, &request.filters))
    }

    fn validate(request: &SearchRequest) -> Result<()> {
        request
            .validate()
            .map_err(|e| FetchError::InvalidRequest(e.to_string()))
    }

    /// Run one task per provider and collect their records.
    ///
    /// Each task sends its batch to a single collector; the call returns
    /// once every task has finished.
    async fn run_providers(
        &self,
        ctx: &FetchContext,
        providers: Vec<Arc<ProviderConfig>>,
        request: &SearchRequest,
    ) -> Result<Vec<Torrent>> {
        if ctx.is_done() {
            return Err(FetchError::SearchCancelled);
        }
        if providers.is_empty() {
            return Ok(Vec::new());
        }

        let (tx, mut rx) = mpsc::channel::<Vec<Torrent>>(providers.len());
        let request = Arc::new(request.clone());
        let mut tasks = JoinSet::new();

        for config in providers {
            let tx = tx.clone();
            let request = Arc::clone(&request);
            let provider_ctx = ctx.child_with_timeout(self.settings.provider_timeout());
            let span = info_span!("provider", name = %config.id);
            let client = ProviderClient::new(config, self.http.clone(), self.settings.clone());

            tasks.spawn(
                async move {
                    match client.fetch_and_normalize(&provider_ctx, &request).await {
                        Ok(torrents) => {
                            // receiver only goes away if the search itself was dropped
                            let _ = tx.send(torrents).await;
                        }
                        Err(e) if e.is_provider_local() => {
                            warn!(error = %e, "provider fetch failed");
                        }
                        Err(e) => {
                            error!(error = %e, "provider could not be queried");
                        }
                    }
                }
                .instrument(span),
            );
        }
        drop(tx);

        let mut merged = Vec::new();
        while let Some(batch) = rx.recv().await {
            merged.extend(batch);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!("Provider task panicked: {}", e);
            }
        }

        info!(total = merged.len(), "merged provider results");
        Ok(merged)
    }
}
