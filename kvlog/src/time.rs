//! Timestamps for log entries.
//!
//! The logger reads the current time through a plain [`TimeFunction`] so tests can pin it to a fixed instant.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local};

/// Returns the instant recorded for an entry.
pub type TimeFunction = fn() -> DateTime<FixedOffset>;

/// Default `strftime` pattern of the text formatter, e.g. `2024/05/17 14:03:59`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Current local time, the default [`TimeFunction`].
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Formats `time` with the `strftime` pattern `format`.
///
/// An invalid pattern falls back to RFC 3339 rather than losing the timestamp.
pub fn format_timestamp(time: &DateTime<FixedOffset>, format: &str) -> String {
    let mut formatted = String::new();
    match write!(formatted, "{}", time.format(format)) {
        Ok(()) => formatted,
        Err(_) => time.to_rfc3339(),
    }
}
