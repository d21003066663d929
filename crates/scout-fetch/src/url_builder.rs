use crate::error::{FetchError, Result};
use scout_provider::{ProviderConfig, QUERY_PLACEHOLDER};

/// Substitute the escaped query into the provider's search template.
///
/// Absolute templates are used as-is; relative ones are joined to the base URL.
pub fn build_search_url(config: &ProviderConfig, query: &str) -> Result<String> {
    let query = query.trim();
    if query.is_empty() {
        return Err(FetchError::InvalidRequest(
            "search query cannot be empty".to_string(),
        ));
    }

    let path = config
        .search_url
        .replace(QUERY_PLACEHOLDER, &urlencoding::encode(query));

    Ok(join_url(&config.base_url, &path))
}

/// Resolve a link found on a provider page against its base URL.
pub fn join_url(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    if href.is_empty() {
        return base_url.to_string();
    }

    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        href.trim_start_matches('/')
    )
}
