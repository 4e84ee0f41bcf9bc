//! Leading timestamp extraction.
//!
//! The size tracker's logger prefixes every line with a timestamp of the form
//! `Mon Jan 15 10:11:12.123456 PM 2024`. Lines without that prefix are noise
//! interleaved by other writers and are never routed to a handler.

use regex::Regex;
use std::sync::LazyLock;

/// Weekday, month, day, `HH:MM:SS.micros`, meridiem, year.
static TIMESTAMP_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+ \w+ \d+ \d+:\d+:\d+\.\d+ \w+ \d+)").expect("Invalid timestamp regex")
});

/// Returns the timestamp prefix of `line`, or `None` if the line has none.
///
/// # Example
/// ```
/// use sizeaudit_core::timestamp::extract_timestamp;
///
/// let line = "Mon Jan 15 10:11:12.123456 PM 2024 TRACE [journal.go] ...";
/// assert_eq!(extract_timestamp(line), Some("Mon Jan 15 10:11:12.123456 PM 2024"));
/// assert_eq!(extract_timestamp("panic: runtime error"), None);
/// ```
pub fn extract_timestamp(line: &str) -> Option<&str> {
    TIMESTAMP_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
