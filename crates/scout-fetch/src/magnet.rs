//! Magnet URI construction.

/// Build `magnet:?xt=urn:btih:<hash>&dn=<name>&tr=<tracker>...`.
///
/// The display name and every tracker are percent-escaped. With no
/// trackers the URI ends after `dn`.
#[must_use]
pub fn build_magnet(info_hash: &str, name: &str, trackers: &[String]) -> String {
    let mut magnet = format!(
        "magnet:?xt=urn:btih:{}&dn={}",
        info_hash.trim(),
        urlencoding::encode(name)
    );
    for tracker in trackers {
        magnet.push_str("&tr=");
        magnet.push_str(&urlencoding::encode(tracker));
    }
    magnet
}

/// Whether a hash is the all-zero placeholder some APIs return in place of
/// an empty result list.
#[must_use]
pub fn is_null_hash(info_hash: &str) -> bool {
    let hash = info_hash.trim();
    !hash.is_empty() && hash.chars().all(|c| c == '0')
}
