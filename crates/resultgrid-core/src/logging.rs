//! Logging facilities for resultgrid.
//!
//! resultgrid uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!     // ...
//! }
//! ```
//!
//! Per-call events (cell configured, signal emitted) are logged at `trace`,
//! lifecycle events at `debug`, and fetch failures at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=resultgrid::adapter=trace`.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "resultgrid_core::signal";
    /// Grid adapter target.
    pub const ADAPTER: &str = "resultgrid::adapter";
    /// Cell registry target.
    pub const CELLS: &str = "resultgrid::cells";
    /// In-memory result provider target.
    pub const RESULTS: &str = "resultgrid::results";
    /// Change-driven grid updater target.
    pub const UPDATER: &str = "resultgrid::updater";
    /// Configuration loading target.
    pub const CONFIG: &str = "resultgrid::config";
    /// Timing spans target.
    pub const PERF: &str = "resultgrid::perf";
}

/// A guard that keeps a timing span entered until dropped.
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
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level event under the `resultgrid_core` target.
#[macro_export]
macro_rules! grid_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "resultgrid_core", $($arg)*)
    };
}

/// Debug-level event under the `resultgrid_core` target.
#[macro_export]
macro_rules! grid_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "resultgrid_core", $($arg)*)
    };
}

/// Warn-level event under the `resultgrid_core` target.
#[macro_export]
macro_rules! grid_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "resultgrid_core", $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let span = PerfSpan::new("noop");
        drop(span);
        grid_trace!(value = 1, "trace macro expands");
        grid_debug!("debug macro expands");
        grid_warn!("warn macro expands");
    }

    #[test]
    fn test_targets_are_distinct() {
        let all = [
            targets::SIGNAL,
            targets::ADAPTER,
            targets::CELLS,
            targets::RESULTS,
            targets::UPDATER,
            targets::CONFIG,
            targets::PERF,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
