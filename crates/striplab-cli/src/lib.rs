//! Shared utilities for striplab-cli
//!
//! Argument parsing helpers and command implementations shared by the
//! binary entry point.

pub mod commands;
pub mod parsers;

// Re-export commonly used items at the crate root for convenience
pub use parsers::{parse_band, parse_curve_points, parse_mode, parse_point, parse_points};

/// File extensions the batch command picks up when expanding directories.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
