//! resultgrid - binds sectioned, live-updating result sets to grid views.
//!
//! The central type is [`model::ResultSetGridAdapter`]. It sits between a
//! [`model::ResultProvider`] (a sectioned, ordered view over query results)
//! and a [`model::GridSurface`] (a view that hands out reusable cells), and
//! answers the grid's questions:
//!
//! - how many sections and items there are
//! - which entity lives at a position
//! - which configured cell to display at a position
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use resultgrid::prelude::*;
//!
//! fn main() -> resultgrid::Result<()> {
//!     let grid = Arc::new(CellRegistry::new(String::new));
//!     grid.register_cell_type("Cell");
//!
//!     let results = Arc::new(SectionedResults::<String>::new());
//!     let adapter = ResultSetGridAdapter::new(grid, results.clone(), "Cell")?
//!         .with_configure_cell(|cell: &mut String, name: &String| cell.push_str(name));
//!
//!     // Nothing to show until the first fetch completes.
//!     assert!(!adapter.data_available());
//!     assert_eq!(adapter.section_count(), 0);
//!
//!     results.complete_fetch(vec![Section::new(vec!["Ada".to_string()])]);
//!     assert_eq!(adapter.cell_at(Position::new(0, 0))?, "Ada");
//!     Ok(())
//! }
//! ```

pub use resultgrid_core::*;

pub mod config;
mod error;
pub mod model;
pub mod prelude;

pub use config::AdapterConfig;
pub use error::{GridError, Result};
