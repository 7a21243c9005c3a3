//! Prelude module for resultgrid.
//!
//! ```ignore
//! use resultgrid::prelude::*;
//! ```

pub use crate::config::AdapterConfig;
pub use crate::error::{GridError, Result};
pub use crate::model::{
    CellRegistry, ChangeSet, ContentChange, GridDataSource, GridSurface, GridUpdater,
    GridUpdates, LoadState, ObservableResults, Position, ResultProvider, ResultSetGridAdapter,
    Section, SectionedResults,
};
pub use resultgrid_core::Signal;
