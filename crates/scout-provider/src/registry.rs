//! Provider registry: one snapshot of the descriptor directory.

use crate::{definition::ProviderConfig, error::Result, loader::ProviderLoader};
use std::sync::Arc;
use tracing::info;

/// Snapshot of every loaded provider, sorted by name.
///
/// Configs are handed out as `Arc`s so concurrent fetch tasks share one
/// read-only copy.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Arc<ProviderConfig>>,
}

impl ProviderRegistry {
    /// Load all descriptors from the given loader.
    ///
    /// # Errors
    /// Returns error if any descriptor fails to load.
    pub fn load_from(loader: &ProviderLoader) -> Result<Self> {
        let mut providers: Vec<_> = loader.load_all()?.into_iter().map(Arc::new).collect();
        providers.sort_by(|a, b| a.id.cmp(&b.id));

        info!(count = providers.len(), "loaded provider registry");

        Ok(Self { providers })
    }

    /// Get the enabled providers, sorted by name.
    #[must_use]
    pub fn active_only(&self) -> Vec<Arc<ProviderConfig>> {
        self.providers
            .iter()
            .filter(|config| config.enabled)
            .cloned()
            .collect()
    }
}
