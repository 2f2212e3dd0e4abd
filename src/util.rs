use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;

pub const ELLIPSIS: &str = "...";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Cuts `text` down to at most `max_length` characters, preferring the last
/// word boundary, and appends [`ELLIPSIS`]. Text that already fits is
/// returned unchanged.
pub fn shorten(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_owned();
    }

    let prefix = match text.char_indices().nth(max_length) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    };

    let cut = match prefix.rfind(char::is_whitespace) {
        Some(boundary) if boundary > 0 => &prefix[..boundary],
        _ => prefix,
    };

    format!("{}{ELLIPSIS}", cut.trim_end())
}

/// Formats a payload timestamp (`YYYY-MM-DD HH:MM:SS`) as
/// `on 9 Jul 2020 at 18:20`.
pub fn date_time_from_timestamp(timestamp: Option<&str>) -> Option<String> {
    let timestamp = timestamp?.trim();
    if timestamp.is_empty() {
        return None;
    }

    let parsed = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
    Some(format!(
        "on {} at {}",
        parsed.format("%-d %b %Y"),
        parsed.format("%H:%M")
    ))
}

/// Returns the JSON part of a data file, which may be plain JSON or a script
/// of the form `var data = {...};`.
pub fn json_body(raw: &str) -> &str {
    let trimmed = raw.trim().trim_start_matches('\u{feff}');
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    trimmed
        .split_once('=')
        .map(|(_, body)| body.trim().trim_end_matches(';').trim_end())
        .unwrap_or(trimmed)
}

pub fn format_count(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 10_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

pub fn stable_pair(id: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_keeps_short_text() {
        assert_eq!(shorten("digital humanities", 18), "digital humanities");
        assert_eq!(shorten("", 0), "");
        assert_eq!(shorten("abc", 10), "abc");
    }

    #[test]
    fn shorten_breaks_at_word_boundary() {
        let shortened = shorten("The history of the Ottoman empire", 20);
        assert_eq!(shortened, "The history of the...");
    }

    #[test]
    fn shorten_prefix_never_exceeds_limit() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit";
        for limit in 0..text.len() {
            let shortened = shorten(text, limit);
            let prefix = shortened
                .strip_suffix(ELLIPSIS)
                .expect("truncated text carries the marker");
            assert!(prefix.chars().count() <= limit, "limit {limit}: {shortened}");
            assert!(text.starts_with(prefix));
        }
    }

    #[test]
    fn shorten_hard_cuts_single_long_word() {
        assert_eq!(shorten("Donaudampfschifffahrt", 5), "Donau...");
    }

    #[test]
    fn shorten_counts_characters_not_bytes() {
        assert_eq!(shorten("Übersicht über Österreich", 25), "Übersicht über Österreich");
        assert_eq!(shorten("Übersicht über Österreich", 16), "Übersicht über...");
    }

    #[test]
    fn shorten_is_idempotent_on_fitting_text() {
        let once = shorten("a b c", 5);
        assert_eq!(shorten(&once, 5), once);
    }

    #[test]
    fn date_time_formats_payload_timestamp() {
        assert_eq!(
            date_time_from_timestamp(Some("2020-07-09 18:20:14")).as_deref(),
            Some("on 9 Jul 2020 at 18:20")
        );
    }

    #[test]
    fn date_time_missing_or_invalid_is_none() {
        assert_eq!(date_time_from_timestamp(None), None);
        assert_eq!(date_time_from_timestamp(Some("")), None);
        assert_eq!(date_time_from_timestamp(Some("yesterday")), None);
    }

    #[test]
    fn json_body_strips_script_assignment() {
        assert_eq!(json_body("  {\"a\": 1} "), "{\"a\": 1}");
        assert_eq!(json_body("var data_config = {\"a\": 1};\n"), "{\"a\": 1}");
        assert_eq!(json_body("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn format_count_abbreviates_large_values() {
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(12_345), "12.3k");
        assert_eq!(format_count(2_500_000), "2.5M");
    }

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let (x, y) = stable_pair("area-1");
        assert_eq!(stable_pair("area-1"), (x, y));
        assert!((-1.0..=1.0).contains(&x));
        assert!((-1.0..=1.0).contains(&y));
    }
}
