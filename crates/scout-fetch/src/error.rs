use scout_core::{Interrupted, ProviderId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Transport failure for provider {provider}: {source}")]
    Transport {
        provider: ProviderId,
        #[source]
        source: reqwest::Error,
    },

    #[error("Provider {provider} answered HTTP {status}")]
    HttpStatus { provider: ProviderId, status: u16 },

    #[error("Provider {provider} timed out")]
    Timeout { provider: ProviderId },

    #[error("Fetch for provider {provider} was cancelled")]
    Cancelled { provider: ProviderId },

    #[error("Unrecognised response from provider {provider}: {reason}")]
    Format { provider: ProviderId, reason: String },

    #[error("Selectors outdated for provider {provider}: {reason}")]
    SelectorsOutdated { provider: ProviderId, reason: String },

    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("Search cancelled before any provider was queried")]
    SearchCancelled,

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Provider error: {0}")]
    Provider(#[from] scout_provider::ProviderError),
}

impl FetchError {
    pub(crate) fn transport(provider: &ProviderId, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout {
                provider: provider.clone(),
            }
        } else {
            Self::Transport {
                provider: provider.clone(),
                source,
            }
        }
    }

    pub(crate) fn interrupted(provider: &ProviderId, reason: Interrupted) -> Self {
        let provider = provider.clone();
        match reason {
            Interrupted::Cancelled => Self::Cancelled { provider },
            Interrupted::DeadlineExceeded => Self::Timeout { provider },
        }
    }

    /// Whether the error is confined to one provider's contribution.
    #[must_use]
    pub fn is_provider_local(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::HttpStatus { .. }
                | Self::Timeout { .. }
                | Self::Cancelled { .. }
                | Self::Format { .. }
                | Self::SelectorsOutdated { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
