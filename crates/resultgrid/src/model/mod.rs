//! Result-set-to-grid binding.
//!
//! This module provides the types that connect a sectioned result set to a
//! grid view:
//!
//! - `Position`: Identifies an entity by section and item
//! - `ResultProvider`: The trait result sets implement
//! - `GridSurface`: The trait grids implement to hand out cells
//! - `ResultSetGridAdapter`: Answers grid queries from a provider
//!
//! # Implementations
//!
//! - `SectionedResults`: In-memory, observable result provider
//! - `CellRegistry`: Factory-backed grid surface
//! - `GridUpdater`: Replays provider changes onto a grid
//!
//! # Architecture Overview
//!
//! ```text
//! ┌────────────────┐  counts / entity_at   ┌─────────────────────┐  cell_for_item  ┌─────────────┐
//! │ ResultProvider │<──────────────────────│ ResultSetGridAdapter│<────────────────│ GridSurface │
//! └────────────────┘                       └─────────────────────┘  dequeue cell   └─────────────┘
//!         │ ResultSignals                                                                ^
//!         └──────────────────────────> GridUpdater ──────── reload / batch updates ──────┘
//! ```
//!
//! The adapter reads the provider's snapshot on every call. The updater is
//! the only piece that reacts to change notifications.

mod adapter;
mod cell_registry;
mod changes;
mod position;
mod sectioned_results;
mod traits;
mod updater;

pub use adapter::{ConfigureCellFn, ResultSetGridAdapter};
pub use cell_registry::{CellFactory, CellRegistry};
pub use changes::{ChangeSet, ContentChange};
pub use position::Position;
pub use sectioned_results::{ResultsBatch, Section, SectionedResults};
pub use traits::{
    GridDataSource, GridSurface, GridUpdates, LoadState, ObservableResults, ResultProvider,
    ResultSignals,
};
pub use updater::GridUpdater;
