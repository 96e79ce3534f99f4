//! Logging facilities for Bots and Tiles.
//!
//! This module provides:
//! - Target and span names for filtering logs by subsystem
//! - Performance tracing hooks for timing parse and layout passes
//!
//! # Tracing Integration
//!
//! Bots and Tiles uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Build boxes and screens...
//! }
//! ```
//!
//! Filter a single subsystem with a directive such as
//! `RUST_LOG=bots_tiles::layout=debug`.

/// Span names used throughout Bots and Tiles for tracing.
pub mod span_names {
    /// Markup parsing span.
    pub const PARSE: &str = "bots_tiles::parse";
    /// Wrapping and layout span.
    pub const LAYOUT: &str = "bots_tiles::layout";
    /// Overflow resolution span.
    pub const OVERFLOW: &str = "bots_tiles::overflow";
    /// Painting span.
    pub const PAINT: &str = "bots_tiles::paint";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Markup parser target.
    pub const MARKUP: &str = "bots_tiles::markup";
    /// Line wrapping and layout target.
    pub const LAYOUT: &str = "bots_tiles::layout";
    /// Overflow resolver target.
    pub const OVERFLOW: &str = "bots_tiles::overflow";
    /// Font loading and shaping target.
    pub const TEXT: &str = "bots_tiles::text";
    /// Widget target (boxes and screens).
    pub const WIDGET: &str = "bots_tiles::widget";
    /// Target of [`PerfSpan`](super::PerfSpan) spans.
    pub const PERF: &str = "bots_tiles::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// This is useful for tracking the duration of operations.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span() {
        // Just ensure it compiles and doesn't panic without a subscriber
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_share_prefix() {
        // `RUST_LOG=bots_tiles=debug` has to reach every subsystem.
        for target in [
            targets::MARKUP,
            targets::LAYOUT,
            targets::OVERFLOW,
            targets::TEXT,
            targets::WIDGET,
            targets::PERF,
        ] {
            assert!(target.starts_with("bots_tiles::"));
        }
    }
}
