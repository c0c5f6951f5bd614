//! Date formatting for changelog headings

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date (UTC) as `YYYY-MM-DD`
pub(crate) fn today() -> String {
    Utc::now().format(DATE_FORMAT).to_string()
}

/// Formats a Unix timestamp as `YYYY-MM-DD` (UTC)
pub(crate) fn format_unix_timestamp(timestamp: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).map(|dt| dt.format(DATE_FORMAT).to_string())
}

/// Reformats a commit date as `YYYY-MM-DD` (UTC)
///
/// Accepts RFC 3339, RFC 2822, git's ISO-like `%ci` output
/// (`2015-01-05 12:00:00 +0100`) and plain dates. Returns `None` when the
/// text matches none of them.
pub(crate) fn format_commit_date(text: &str) -> Option<String> {
    let text = text.trim();

    let parsed = DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S %z"))
        .map(|dt| dt.with_timezone(&Utc));

    if let Ok(dt) = parsed {
        return Some(dt.format(DATE_FORMAT).to_string());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.format(DATE_FORMAT).to_string());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .map(|date| date.format(DATE_FORMAT).to_string())
}
