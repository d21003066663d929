//! Post-fetch filtering and ordering of merged results.

use scout_core::{parse_size, ContentType, SearchFilters, Torrent, GB, MB};
use std::ops::RangeInclusive;
use tracing::debug;

/// Accepted movie sizes.
pub const MOVIE_SIZE: RangeInclusive<u64> = 700 * MB..=3 * GB;

/// Accepted series sizes.
pub const SERIE_SIZE: RangeInclusive<u64> = 250 * MB..=(3 * GB / 2);

/// Quality tag that is always dropped.
pub const EXCLUDED_QUALITY: &str = "HDCAM";

/// Apply user filters plus the fixed quality and size rules, then sort by
/// size ascending.
///
/// Items whose size does not parse skip the size rule and sort last, keeping
/// their relative order. Applying the filter twice yields the same list.
#[must_use]
pub fn post_filter(items: Vec<Torrent>, filters: &SearchFilters) -> Vec<Torrent> {
    let received = items.len();
    let resolution = filters.resolution.to_lowercase();
    let group = filters.group.to_lowercase();
    let title = normalize_for_match(&filters.title);

    let mut kept: Vec<(Option<u64>, Torrent)> = items
        .into_iter()
        .filter(|item| resolution.is_empty() || item.resolution.to_lowercase().contains(&resolution))
        .filter(|item| {
            group.is_empty()
                || item.group.contains(&group)
                || item.original_title.to_lowercase().contains(&group)
        })
        .filter(|item| title.is_empty() || normalize_for_match(&item.title) == title)
        .filter(|item| !item.quality.eq_ignore_ascii_case(EXCLUDED_QUALITY))
        .filter(|item| matches_episode(item, filters))
        .map(|item| (parse_size(&item.size), item))
        .filter(|(bytes, item)| bytes.map_or(true, |b| size_bounds(item.content_type).contains(&b)))
        .collect();

    // `None` sorts after every `Some` here; sort_by_key is stable
    kept.sort_by_key(|(bytes, _)| (bytes.is_none(), bytes.unwrap_or(0)));

    debug!(received, kept = kept.len(), "post-filtered results");

    kept.into_iter().map(|(_, item)| item).collect()
}

fn size_bounds(content_type: ContentType) -> &'static RangeInclusive<u64> {
    match content_type {
        ContentType::Movie => &MOVIE_SIZE,
        ContentType::Serie => &SERIE_SIZE,
    }
}

fn matches_episode(item: &Torrent, filters: &SearchFilters) -> bool {
    if item.content_type != ContentType::Serie {
        return true;
    }
    (filters.season == 0 || item.season == filters.season)
        && (filters.episode == 0 || item.episode == filters.episode)
}

/// Lowercase, separators to spaces, whitespace collapsed.
fn normalize_for_match(text: &str) -> String {
    text.to_lowercase()
        .replace(['.', '_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torrent(title: &str, resolution: &str, size: &str) -> Torrent {
        Torrent {
            provider: "test".to_string(),
            content_type: ContentType::Movie,
            title: title.to_string(),
            original_title: format!("{title}.{resolution}-GRP"),
            year: 2020,
            group: "grp".to_string(),
            resolution: resolution.to_string(),
            codec: String::new(),
            quality: "BluRay".to_string(),
            seeds: 1,
            peers: 1,
            size: size.to_string(),
            season: 0,
            episode: 0,
            magnet: "magnet:?xt=urn:btih:x".to_string(),
        }
    }

    fn episode(season: u32, episode: u32, size: &str) -> Torrent {
        Torrent {
            content_type: ContentType::Serie,
            season,
            episode,
            ..torrent("Show", "720p", size)
        }
    }

    fn sizes(items: &[Torrent]) -> Vec<&str> {
        items.iter().map(|t| t.size.as_str()).collect()
    }

    #[test]
    fn test_resolution_filter() {
        let items = vec![
            torrent("A", "720p", "1 GB"),
            torrent("B", "1080p", "2 GB"),
        ];
        let filters = SearchFilters {
            resolution: "1080P".to_string(),
            ..SearchFilters::default()
        };

        let out = post_filter(items, &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].resolution, "1080p");
    }

    #[test]
    fn test_group_filter_matches_group_or_original_title() {
        let mut other = torrent("B", "1080p", "2 GB");
        other.group = "yts".to_string();
        other.original_title = "B [YTS.MX]".to_string();
        let mut unrelated = torrent("C", "1080p", "2 GB");
        unrelated.group = "rarbg".to_string();
        unrelated.original_title = "C.1080p-RARBG".to_string();

        let filters = SearchFilters {
            group: "YTS".to_string(),
            ..SearchFilters::default()
        };
        let out = post_filter(vec![other, unrelated], &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn test_title_filter_exact_after_normalization() {
        let items = vec![
            torrent("The Matrix", "1080p", "2 GB"),
            torrent("The Matrix Reloaded", "1080p", "2 GB"),
        ];

        let filters = SearchFilters {
            title: "the.matrix".to_string(),
            ..SearchFilters::default()
        };
        let out = post_filter(items.clone(), &filters);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "The Matrix");

        // empty title filter keeps everything
        assert_eq!(post_filter(items, &SearchFilters::default()).len(), 2);
    }

    #[test]
    fn test_hdcam_excluded() {
        let mut cam = torrent("A", "1080p", "1 GB");
        cam.quality = "hdcam".to_string();

        let out = post_filter(vec![cam, torrent("B", "1080p", "1 GB")], &SearchFilters::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn test_size_bounds() {
        let items = vec![
            torrent("small", "1080p", "699 MB"),
            torrent("min", "1080p", "700 MB"),
            torrent("max", "1080p", "3 GB"),
            torrent("big", "1080p", "3.01 GB"),
            episode(1, 1, "249 MB"),
            episode(1, 2, "250 MB"),
            episode(1, 3, "1.5 GB"),
            episode(1, 4, "1.6 GB"),
        ];

        let out = post_filter(items, &SearchFilters::default());
        assert_eq!(sizes(&out), vec!["250 MB", "700 MB", "1.5 GB", "3 GB"]);
        assert!(out.iter().all(|t| t.title != "small" && t.title != "big"));
    }

    #[test]
    fn test_unparseable_size_kept_and_sorted_last() {
        let items = vec![
            torrent("first-unknown", "1080p", "unknown"),
            torrent("big", "1080p", "2 GB"),
            torrent("second-unknown", "1080p", ""),
            torrent("small", "1080p", "1 GB"),
        ];

        let out = post_filter(items, &SearchFilters::default());
        let order: Vec<_> = out.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(order, vec!["small", "big", "first-unknown", "second-unknown"]);
    }

    #[test]
    fn test_season_episode_only_when_set() {
        let items = vec![episode(1, 1, "500 MB"), episode(1, 2, "600 MB"), episode(2, 1, "700 MB")];

        // unset season/episode must not drop series
        assert_eq!(post_filter(items.clone(), &SearchFilters::default()).len(), 3);

        let season_only = SearchFilters {
            season: 1,
            ..SearchFilters::default()
        };
        assert_eq!(post_filter(items.clone(), &season_only).len(), 2);

        let exact = SearchFilters {
            season: 1,
            episode: 2,
            ..SearchFilters::default()
        };
        let out = post_filter(items, &exact);
        assert_eq!(out.len(), 1);
        assert_eq!((out[0].season, out[0].episode), (1, 2));
    }

    #[test]
    fn test_season_filter_ignores_movies() {
        let filters = SearchFilters {
            season: 3,
            ..SearchFilters::default()
        };
        let out = post_filter(vec![torrent("Movie", "1080p", "1 GB")], &filters);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let items = vec![
            torrent("c", "1080p", "2.5 GB"),
            torrent("a", "720p", "800 MB"),
            torrent("x", "1080p", "n/a"),
            episode(1, 1, "300 MB"),
        ];
        let filters = SearchFilters {
            group: "grp".to_string(),
            ..SearchFilters::default()
        };

        let once = post_filter(items, &filters);
        let twice = post_filter(once.clone(), &filters);
        assert_eq!(once, twice);
    }
}
