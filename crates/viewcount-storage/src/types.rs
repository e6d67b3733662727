//! The persisted counter record.
//!
//! [`CounterRecord`] is defined here (not in the server crate) because the
//! counter only exists as persisted state — it has no in-memory life of its
//! own beyond a single request.

use serde::{Deserialize, Serialize};

/// The persisted view counter.
///
/// Serializes to the on-disk file layout:
/// `{ "views": <int>, "lastUpdated": "<ISO-8601>" }`.
///
/// `last_updated` is `None` when loaded from the key-value layout, which
/// stores only the decimal count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    /// The view count. Monotonically non-decreasing except for out-of-band
    /// resets.
    pub views: u64,
    /// When the record was last written, ISO-8601 UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl CounterRecord {
    /// Creates a record with the given count, stamped with the current time.
    pub fn new(views: u64) -> Self {
        CounterRecord {
            views,
            last_updated: Some(now_iso8601()),
        }
    }
}

/// Returns the current UTC timestamp in ISO 8601 format.
pub fn now_iso8601() -> String {
    use std::time::SystemTime;
    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    let secs = duration.as_secs();

    let days = secs / 86400;
    let remaining = secs % 86400;
    let hours = remaining / 3600;
    let minutes = (remaining % 3600) / 60;
    let seconds = remaining % 60;

    let (year, month, day) = days_to_date(days);

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year, month, day, hours, minutes, seconds
    )
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: u64) -> (u64, u64, u64) {
    // Algorithm from http://howardhinnant.github.io/date_algorithms.html
    let z = days + 719468;
    let era = z / 146097;
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if m <= 2 { y + 1 } else { y };
    (year, m, d)
}
