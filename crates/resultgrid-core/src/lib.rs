//! Core systems for resultgrid.
//!
//! This crate provides the pieces the grid adapter layer builds on:
//!
//! - **Signal/Slot System**: Type-safe change notification between a result
//!   provider and its observers
//! - **Logging**: `tracing` targets and helpers shared across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use resultgrid_core::Signal;
//!
//! let did_change = Signal::<()>::new();
//! let conn_id = did_change.connect(|_| println!("content changed"));
//! did_change.emit(());
//! did_change.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
