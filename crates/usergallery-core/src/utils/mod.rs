//! Utility functions for display formatting.

pub mod format;

// Re-export commonly used functions at module level
pub use format::{format_address, format_birthday, format_elapsed, format_phone, truncate_string};
