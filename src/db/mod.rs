pub mod connection;
pub mod findings;
pub mod scans;
pub mod schema;

pub use connection::Database;

use chrono::{DateTime, NaiveDateTime, Utc};

/// Persisted timestamp format. Plain UTC with second precision; SQLite's
/// date functions parse it directly, which the trend and prune queries
/// depend on.
pub(crate) const SCAN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_scan_date(date: DateTime<Utc>) -> String {
    date.format(SCAN_DATE_FORMAT).to_string()
}

pub(crate) fn parse_scan_date(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, SCAN_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
