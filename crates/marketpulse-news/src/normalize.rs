//! Time-field normalization: strip the trailing timezone marker and coerce
//! the remainder to a timestamp, or null.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Strip a trailing `ET` timezone marker and anything after it, then trim.
///
/// Mirrors the source datasets' convention of suffixing wall-clock times
/// with `ET` plus arbitrary trailing text. Other timezone labels are left
/// untouched and simply fail to parse downstream.
#[must_use]
pub fn strip_timezone_suffix(raw: &str) -> String {
    let re = Regex::new(r"ET.*").expect("valid timezone suffix regex");
    re.replace(raw, "").trim().to_string()
}

/// Parse a normalized time string against a fixed format list.
///
/// Unparsable strings become `None` — coerce-invalid-to-null, never an
/// error. Date-only values anchor to midnight; bare clock times anchor to
/// the epoch date so intra-day ordering is preserved.
#[must_use]
pub fn parse_news_time(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    // Date-only layouts seen across the source datasets.
    for format in ["%Y-%m-%d", "%d-%b-%y", "%b %d %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }

    // Bare wall-clock time, anchored to the epoch date.
    for format in ["%H:%M:%S", "%H:%M", "%I:%M %p"] {
        if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
            return Some(NaiveDate::from_ymd_opt(1970, 1, 1)?.and_time(time));
        }
    }

    None
}

/// Normalize a raw time field end to end: strip the timezone suffix, then
/// parse. Returns `None` for missing, empty, or unparsable input.
#[must_use]
pub fn normalize_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    let raw = raw?;
    parse_news_time(&strip_timezone_suffix(raw))
}
