//! Field converters shared by the warning and forecast normalizers.
//!
//! Each converter returns `None` (or its documented default) for input it cannot
//! read, so a single odd field never costs the surrounding record.

use crate::normalize::into_utc::IntoUtcDateTime;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::BTreeMap;

pub const DEFAULT_COLOR: &str = "#000000";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses an ISO 8601 timestamp.
///
/// Accepts RFC 3339 timestamps with offset, date-times without offset (read as UTC)
/// and plain dates (midnight UTC). Geoserver marks UTC dates with a trailing `Z`,
/// e.g. `2024-05-01Z`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.into_utc());
    }
    if let Some(naive) = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Some(naive.into_utc());
    }
    NaiveDate::parse_from_str(raw.strip_suffix('Z').unwrap_or(raw), "%Y-%m-%d")
        .ok()
        .map(IntoUtcDateTime::into_utc)
}

pub fn timestamp_value(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(parse_timestamp)
}

/// Maps a CAP severity to the DWD warning level 1-4, 0 for anything else.
pub fn severity_level(severity: &str) -> u8 {
    match severity.trim().to_lowercase().as_str() {
        "minor" => 1,
        "moderate" => 2,
        "severe" => 3,
        "extreme" => 4,
        _ => 0,
    }
}

/// Decodes a space separated `"R G B"` triple into `#rrggbb`.
///
/// ```
/// use dwd_wfs::normalize::convert::decode_color;
///
/// assert_eq!(decode_color("255 153 0"), Some("#ff9900".to_string()));
/// assert_eq!(decode_color("255 153"), None);
/// ```
pub fn decode_color(raw: &str) -> Option<String> {
    let channels = raw
        .split(' ')
        .map(|c| c.parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        _ => None,
    }
}

/// Like [`decode_color`] on an optional JSON field, falling back to [`DEFAULT_COLOR`].
pub fn color_or_default(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .and_then(decode_color)
        .unwrap_or_else(|| DEFAULT_COLOR.to_string())
}

/// Zips the parameter name and value lists of a warning into a map.
///
/// Depending on the layer both lists are separated by `,` or by `;`. The names
/// decide: a comma in them means comma separated. Surplus entries on either
/// side are dropped.
pub fn decode_parameters(names: &str, values: &str) -> BTreeMap<String, String> {
    let separator = if names.contains(',') { ',' } else { ';' };
    names
        .split(separator)
        .zip(values.split(separator))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00.000Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("2024-05-01Z"), parse_timestamp("2024-05-01"));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("tomorrow"), None);
        assert_eq!(parse_timestamp("2024-13-01T10:00:00Z"), None);
        assert_eq!(timestamp_value(&Value::from(1714557600)), None);
    }

    #[test]
    fn test_severity_levels() {
        assert_eq!(severity_level("Minor"), 1);
        assert_eq!(severity_level("moderate"), 2);
        assert_eq!(severity_level("SEVERE"), 3);
        assert_eq!(severity_level("Extreme"), 4);
        assert_eq!(severity_level("Unknown"), 0);
        assert_eq!(severity_level(""), 0);
    }

    #[test]
    fn test_color_decoding() {
        assert_eq!(decode_color("0 0 0").as_deref(), Some("#000000"));
        assert_eq!(decode_color("255 255 0").as_deref(), Some("#ffff00"));
        assert_eq!(decode_color("10 171 205").as_deref(), Some("#0aabcd"));
    }

    #[test]
    fn test_malformed_colors_fall_back() {
        for raw in ["", "255", "255 255", "256 0 0", "-1 0 0", "a b c", "255  0 0", "1 2 3 4"] {
            assert_eq!(decode_color(raw), None, "input {:?}", raw);
            assert_eq!(color_or_default(Some(&Value::from(raw))), DEFAULT_COLOR);
        }
        assert_eq!(color_or_default(None), DEFAULT_COLOR);
        assert_eq!(color_or_default(Some(&Value::from(42))), DEFAULT_COLOR);
    }

    #[test]
    fn test_parameters_with_either_separator() {
        let comma = decode_parameters("Wind,Gusts", "60-70 km/h,80 km/h");
        assert_eq!(comma.get("Wind").map(String::as_str), Some("60-70 km/h"));
        assert_eq!(comma.get("Gusts").map(String::as_str), Some("80 km/h"));

        let semicolon = decode_parameters("Niederschlag;Dauer", "15 l/m², 1 h;6 h");
        assert_eq!(semicolon.len(), 2);
        assert_eq!(
            semicolon.get("Niederschlag").map(String::as_str),
            Some("15 l/m², 1 h")
        );
    }

    #[test]
    fn test_parameters_zip_to_shorter_list() {
        let params = decode_parameters("a;b;c", "1;2");
        assert_eq!(params.len(), 2);
        assert!(!params.contains_key("c"));
    }
}
