use crate::error::{FetchError, Result};
use scout_core::ProviderId;
use scout_provider::ScrapeSelectors;
use scraper::{ElementRef, Html, Selector};

/// One result row as found on a provider's search page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapedItem {
    pub detail_url: String,
    pub title: String,
    pub seeds: String,
    pub peers: String,
    pub size: String,
}

/// Compiled selectors for one scrape provider.
///
/// Parsing is synchronous; callers must finish with the document before the
/// next await since `Html` is not `Send`.
#[derive(Debug)]
pub struct ResultParser {
    item: Selector,
    detail_url: Selector,
    title: Selector,
    seeds: Option<Selector>,
    peers: Option<Selector>,
    size: Option<Selector>,
    magnet: Selector,
}

impl ResultParser {
    pub fn new(provider: &ProviderId, selectors: &ScrapeSelectors) -> Result<Self> {
        let compile = |name: &str, css: &str| {
            Selector::parse(css).map_err(|e| FetchError::SelectorsOutdated {
                provider: provider.clone(),
                reason: format!("Invalid {name} selector: {e}"),
            })
        };
        let optional = |name: &str, css: &str| {
            if css.trim().is_empty() {
                Ok(None)
            } else {
                compile(name, css).map(Some)
            }
        };

        let fields = &selectors.fields;
        Ok(Self {
            item: compile("item", &selectors.item)?,
            detail_url: compile("detail link", &fields.detail_url)?,
            title: compile("title", &fields.title)?,
            seeds: optional("seeds", &fields.seeds)?,
            peers: optional("peers", &fields.peers)?,
            size: optional("size", &fields.size)?,
            magnet: compile("magnet", &fields.magnet)?,
        })
    }

    /// Extract every row matching the item selector.
    ///
    /// Rows without a detail link or title are skipped.
    pub fn parse_results(&self, html: &str) -> Vec<ScrapedItem> {
        let document = Html::parse_document(html);

        document
            .select(&self.item)
            .filter_map(|row| self.parse_item(&row))
            .collect()
    }

    fn parse_item(&self, row: &ElementRef) -> Option<ScrapedItem> {
        let detail_url = row
            .select(&self.detail_url)
            .find_map(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())?
            .to_string();

        let title = extract_text(row, Some(&self.title));
        if title.is_empty() {
            return None;
        }

        Some(ScrapedItem {
            detail_url,
            title,
            seeds: extract_text(row, self.seeds.as_ref()),
            peers: extract_text(row, self.peers.as_ref()),
            size: extract_text(row, self.size.as_ref()),
        })
    }

    /// First non-empty `href` matching the magnet selector on a detail page.
    pub fn parse_magnet(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.magnet)
            .filter_map(|el| el.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(String::from)
    }
}

fn extract_text(element: &ElementRef, selector: Option<&Selector>) -> String {
    selector
        .and_then(|sel| element.select(sel).next())
        .map(|el| {
            el.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Parse a seed/peer count, ignoring thousands separators. Defaults to 0.
pub fn parse_count(text: &str) -> u32 {
    let digits: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | ' ' | '\u{a0}'))
        .collect();
    digits.parse().unwrap_or(0)
}
