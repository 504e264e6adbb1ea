//! Utility modules.

/// Epoch timestamp parsing for order dates.
pub mod datetime;

/// Log sanitization so bodies and secrets stay out of logs.
pub mod log_sanitizer;
