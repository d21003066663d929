//! Human-readable size strings.
//!
//! Every `Torrent::size` produced by an API normalizer goes through
//! [`format_size`]; filters and sorting read it back with [`parse_size`].
//! Units are binary (1 KB = 1024 B) and limited to B, KB, MB and GB.

/// One kilobyte in bytes.
pub const KB: u64 = 1024;
/// One megabyte in bytes.
pub const MB: u64 = 1024 * KB;
/// One gigabyte in bytes.
pub const GB: u64 = 1024 * MB;

/// Parse `"<number> <unit>"` into a byte count.
///
/// The unit is case-insensitive and the space is optional. Commas are read
/// as thousands separators. Anything after the unit is ignored, so a
/// doubled cell such as `"1.5 GB1.5 GB"` still parses.
///
/// Returns `None` for unknown units, missing numbers and negative values.
#[must_use]
pub fn parse_size(text: &str) -> Option<u64> {
    let text = text.trim();
    let number_end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(text.len());

    let number: String = text[..number_end].chars().filter(|c| *c != ',').collect();
    if number.is_empty() {
        return None;
    }
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    let rest = text[number_end..].trim_start();
    let unit: String = rest
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_ascii_uppercase();

    let multiplier = match unit.as_str() {
        "B" => 1,
        "KB" => KB,
        "MB" => MB,
        "GB" => GB,
        _ => return None,
    };

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    Some((value * multiplier as f64).round() as u64)
}

/// Format a byte count using the largest unit it reaches, two decimals.
///
/// Bytes below one kilobyte are written without decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Normalize a provider-supplied size: a bare byte count is formatted, a
/// parseable size string is re-formatted, anything else becomes `"0 B"`.
#[must_use]
pub fn normalize_size(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(bytes) = raw.parse::<u64>() {
        return format_size(bytes);
    }
    parse_size(raw).map_or_else(|| format_size(0), format_size)
}
