//! Log sanitization utilities
//!
//! Record payloads (DKIM keys, SPF policies, verification tokens) can be
//! long or sensitive; these helpers keep them bounded in debug/error logs.

use crate::types::Record;

/// Maximum number of bytes of a record value included in log output.
const TRUNCATE_LIMIT: usize = 64;

/// Largest char boundary that is `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a value for safe logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// One-line `name TYPE value` rendering of a record, value truncated.
pub fn describe_record(record: &Record) -> String {
    format!(
        "{} {} {}",
        if record.name.is_empty() {
            "<unnamed>"
        } else {
            &record.name
        },
        record.data.record_type(),
        truncate_for_log(record.data.display_value())
    )
}
