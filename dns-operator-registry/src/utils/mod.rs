//! Utility modules.

/// Log sanitization utilities to keep record payloads bounded in logs.
pub mod log_sanitizer;
