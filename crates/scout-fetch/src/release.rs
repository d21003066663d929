//! Release-name parsing.
//!
//! Scene-style names such as `The.Matrix.1999.1080p.BluRay.x264-GROUP` carry
//! most of their metadata in well-known tokens. [`parse`] picks those tokens
//! out and treats everything before the first one as the title. Parsing never
//! fails; fields that cannot be found stay empty or zero.

use once_cell::sync::Lazy;
use regex::Regex;

static SEASON_EPISODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bS(\d{1,2})[ ._-]?E(\d{1,3})\b").expect("valid regex")
});

static CROSS_EPISODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})x(\d{2,3})\b").expect("valid regex"));

static SEASON_ONLY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:S(\d{1,2})|Season[ ._-]?(\d{1,2}))\b").expect("valid regex")
});

static YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("valid regex"));

static RESOLUTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4}p|4k|uhd)\b").expect("valid regex"));

static QUALITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(blu-?ray|bdrip|brrip|web-?dl|webrip|web|hdtv|pdtv|hdrip|dvdrip|dvdscr|hdcam|hdts|telesync|cam|ts|tc|r5)\b",
    )
    .expect("valid regex")
});

static CODEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(x\.?26[45]|h\.?26[45]|hevc|xvid|divx|av1|avc)\b").expect("valid regex")
});

static GROUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-\s*([A-Za-z0-9]+)\s*(?:\[[^\]]*\])?\s*(?:\.(?i:mkv|mp4|avi))?\s*$")
        .expect("valid regex")
});

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[._\s]+").expect("valid regex"));

/// Metadata recovered from a release name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    /// Text before the first recognised token, separators turned into spaces
    pub title: String,
    /// Release year, 0 when absent
    pub year: u32,
    /// Season number, 0 when absent
    pub season: u32,
    /// Episode number, 0 when absent
    pub episode: u32,
    /// Resolution such as `1080p` or `4k`
    pub resolution: String,
    /// Video codec such as `x264` or `HEVC`
    pub codec: String,
    /// Source tag such as `BluRay` or `WEB-DL`
    pub quality: String,
    /// Release group as written (case preserved)
    pub group: String,
}

/// Parse a raw release name.
///
/// Source and codec tags only count once they appear at or after the first
/// year, episode or resolution token, so title words such as "Cam" or "Web"
/// are left alone.
#[must_use]
pub fn parse(raw: &str) -> ReleaseInfo {
    let raw = raw.trim();
    let mut info = ReleaseInfo::default();
    let mut first_token = raw.len();
    let mut quality_span = 0..0;

    if let Some(caps) = SEASON_EPISODE.captures(raw) {
        info.season = number(caps.get(1).map(|m| m.as_str()));
        info.episode = number(caps.get(2).map(|m| m.as_str()));
        first_token = first_token.min(caps.get(0).map_or(raw.len(), |m| m.start()));
    } else if let Some(caps) = CROSS_EPISODE.captures(raw) {
        info.season = number(caps.get(1).map(|m| m.as_str()));
        info.episode = number(caps.get(2).map(|m| m.as_str()));
        first_token = first_token.min(caps.get(0).map_or(raw.len(), |m| m.start()));
    } else if let Some(caps) = SEASON_ONLY.captures(raw) {
        info.season = number(caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()));
        first_token = first_token.min(caps.get(0).map_or(raw.len(), |m| m.start()));
    }

    // A leading year is part of the title ("1917", "2012"), so take the last
    // one that isn't at the very start.
    if let Some(m) = YEAR.find_iter(raw).filter(|m| m.start() > 0).last() {
        info.year = number(Some(m.as_str()));
        first_token = first_token.min(m.start());
    }

    if let Some(m) = RESOLUTION.find(raw) {
        info.resolution = m.as_str().to_ascii_lowercase();
        first_token = first_token.min(m.start());
    }

    let anchor = (first_token < raw.len()).then_some(first_token);
    let after_anchor = |m: &regex::Match| anchor.map_or(true, |a| m.start() >= a);

    if let Some(m) = QUALITY.find_iter(raw).find(after_anchor) {
        info.quality = canonical_quality(m.as_str());
        quality_span = m.range();
        first_token = first_token.min(m.start());
    }

    if let Some(m) = CODEC.find_iter(raw).find(after_anchor) {
        info.codec = canonical_codec(m.as_str());
        first_token = first_token.min(m.start());
    }

    // Only trust a trailing "-NAME" once some other token was recognised,
    // otherwise hyphenated titles lose their last word.
    if first_token < raw.len() {
        if let Some(caps) = GROUP.captures(raw) {
            let whole = caps.get(0).map_or(raw.len(), |m| m.start());
            if whole >= first_token && !quality_span.contains(&whole) {
                info.group = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
            }
        }
    }

    info.title = spaced(&raw[..first_token]);
    info
}

/// Display form of a parsed title: hyphens become spaces, `(` and `[` are
/// dropped, surrounding whitespace trimmed.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let replaced: String = title
        .chars()
        .filter(|c| *c != '(' && *c != '[')
        .map(|c| if c == '-' { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn spaced(text: &str) -> String {
    SEPARATORS
        .replace_all(text, " ")
        .trim_matches(|c: char| c.is_whitespace() || c == '-' || c == '(' || c == '[')
        .to_string()
}

fn number(text: Option<&str>) -> u32 {
    text.and_then(|t| t.parse().ok()).unwrap_or(0)
}

fn canonical_quality(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    let canonical = match lower.as_str() {
        "bluray" | "blu-ray" => "BluRay",
        "bdrip" => "BDRip",
        "brrip" => "BRRip",
        "web-dl" | "webdl" => "WEB-DL",
        "webrip" => "WEBRip",
        "web" => "WEB",
        "hdtv" => "HDTV",
        "pdtv" => "PDTV",
        "hdrip" => "HDRip",
        "dvdrip" => "DVDRip",
        "dvdscr" => "DVDScr",
        "hdcam" => "HDCAM",
        "hdts" => "HDTS",
        "telesync" => "TELESYNC",
        "cam" => "CAM",
        "ts" => "TS",
        "tc" => "TC",
        "r5" => "R5",
        _ => return token.to_string(),
    };
    canonical.to_string()
}

fn canonical_codec(token: &str) -> String {
    let lower = token.to_ascii_lowercase().replace('.', "");
    match lower.as_str() {
        "hevc" => "HEVC".to_string(),
        "xvid" => "XviD".to_string(),
        "divx" => "DivX".to_string(),
        "av1" => "AV1".to_string(),
        "avc" => "AVC".to_string(),
        _ => lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie_release() {
        let info = parse("The.Matrix.1999.1080p.BluRay.x264-GROUP");

        assert_eq!(info.title, "The Matrix");
        assert_eq!(info.year, 1999);
        assert_eq!(info.resolution, "1080p");
        assert_eq!(info.quality, "BluRay");
        assert_eq!(info.codec, "x264");
        assert_eq!(info.group, "GROUP");
        assert_eq!(info.season, 0);
        assert_eq!(info.episode, 0);
    }

    #[test]
    fn test_parse_episode_release() {
        let info = parse("Show.Name.S01E02.720p-GROUP");

        assert_eq!(info.title, "Show Name");
        assert_eq!(info.season, 1);
        assert_eq!(info.episode, 2);
        assert_eq!(info.resolution, "720p");
        assert_eq!(info.group, "GROUP");
    }

    #[test]
    fn test_parse_alternative_episode_forms() {
        let info = parse("Some Show 3x07 HDTV XviD-LOL");
        assert_eq!((info.season, info.episode), (3, 7));
        assert_eq!(info.title, "Some Show");
        assert_eq!(info.quality, "HDTV");
        assert_eq!(info.codec, "XviD");

        let info = parse("Some Show Season 2 Complete 1080p WEB-DL");
        assert_eq!((info.season, info.episode), (2, 0));
        assert_eq!(info.quality, "WEB-DL");
        assert!(info.group.is_empty());
        assert_eq!(info.title, "Some Show");
    }

    #[test]
    fn test_parse_spaced_title_with_brackets() {
        let info = parse("Dune Part Two (2024) [2160p] [4K] [WEB] [5.1] [YTS.MX]");

        assert_eq!(info.title, "Dune Part Two");
        assert_eq!(info.year, 2024);
        assert_eq!(info.resolution, "2160p");
        assert_eq!(info.quality, "WEB");
    }

    #[test]
    fn test_leading_year_stays_in_title() {
        let info = parse("1917.2019.1080p.BluRay.H264-RARBG");

        assert_eq!(info.title, "1917");
        assert_eq!(info.year, 2019);
        assert_eq!(info.codec, "h264");
        assert_eq!(info.group, "RARBG");
    }

    #[test]
    fn test_hyphenated_title_without_tokens() {
        let info = parse("Spider-Man");

        assert_eq!(info.title, "Spider-Man");
        assert!(info.group.is_empty());
    }

    #[test]
    fn test_unparseable_input_is_best_effort() {
        assert_eq!(parse(""), ReleaseInfo::default());

        let info = parse("just some words");
        assert_eq!(info.title, "just some words");
        assert_eq!(info.year, 0);
        assert!(info.resolution.is_empty());
    }

    #[test]
    fn test_cam_release() {
        let info = parse("New.Movie.2024.HDCAM.x264-NOGRP");
        assert_eq!(info.quality, "HDCAM");
        assert_eq!(info.title, "New Movie");
    }

    #[test]
    fn test_title_words_that_look_like_tags() {
        let info = parse("Cam.2018.1080p.WEBRip.x264-GRP");
        assert_eq!(info.title, "Cam");
        assert_eq!(info.quality, "WEBRip");
        assert_eq!(info.year, 2018);

        let info = parse("Charlotte's.Web.2006.1080p.BluRay.x264-GRP");
        assert_eq!(info.title, "Charlotte's Web");
        assert_eq!(info.quality, "BluRay");
        assert_eq!(info.group, "GRP");

        let info = parse("Avc.Ts.Tc.S02E03.720p.HDTV.x264-GRP");
        assert_eq!(info.title, "Avc Ts Tc");
        assert_eq!(info.quality, "HDTV");
        assert_eq!(info.codec, "x264");
    }

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("Spider-Man (2002"), "Spider Man 2002");
        assert_eq!(normalize_title("  [Show Name  "), "Show Name");
        assert_eq!(normalize_title(""), "");
    }
}
