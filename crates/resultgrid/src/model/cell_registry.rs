//! Factory-backed grid surface.
//!
//! `CellRegistry<C>` maps cell identifiers to factories and builds a fresh
//! cell for every dequeue. It is the headless counterpart of a real grid
//! view: enough to drive an adapter in tools and tests, without any
//! recycling pool.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use resultgrid_core::logging::targets;

use super::position::Position;
use super::traits::GridSurface;
use crate::error::{GridError, Result};

/// Type alias for a cell factory function.
pub type CellFactory<C> = Arc<dyn Fn() -> C + Send + Sync>;

/// A [`GridSurface`] that creates cells from registered factories.
///
/// # Example
///
/// ```
/// use resultgrid::model::{CellRegistry, GridSurface, Position};
///
/// let grid = CellRegistry::new(|| String::from("plain"));
/// grid.register_cell_type("Cell");
/// grid.register_cell_type_with("Header", || String::from("header"));
///
/// let cell = grid.dequeue_reusable_cell("Header", Position::new(0, 0)).unwrap();
/// assert_eq!(cell, "header");
/// assert!(grid.dequeue_reusable_cell("Footer", Position::new(0, 0)).is_err());
/// ```
pub struct CellRegistry<C> {
    default_factory: CellFactory<C>,
    factories: RwLock<HashMap<String, CellFactory<C>>>,
}

impl<C> CellRegistry<C> {
    /// Creates a registry whose plain registrations use `default_factory`.
    pub fn new<F>(default_factory: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            default_factory: Arc::new(default_factory),
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `identifier` with its own factory, replacing any previous one.
    pub fn register_cell_type_with<F>(&self, identifier: impl Into<String>, factory: F)
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.factories
            .write()
            .insert(identifier.into(), Arc::new(factory));
    }

    /// Removes a registration. Returns `true` if it existed.
    pub fn unregister(&self, identifier: &str) -> bool {
        self.factories.write().remove(identifier).is_some()
    }

    /// Returns `true` if `identifier` is registered.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.factories.read().contains_key(identifier)
    }

    /// Returns the registered identifiers in sorted order.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.factories.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl<C> GridSurface for CellRegistry<C> {
    type Cell = C;

    fn register_cell_type(&self, identifier: &str) {
        self.factories
            .write()
            .insert(identifier.to_string(), self.default_factory.clone());
    }

    fn dequeue_reusable_cell(&self, identifier: &str, position: Position) -> Result<C> {
        let factory = self
            .factories
            .read()
            .get(identifier)
            .cloned()
            .ok_or_else(|| GridError::UnregisteredCellIdentifier(identifier.to_string()))?;
        tracing::trace!(target: targets::CELLS, identifier, %position, "dequeued cell");
        Ok(factory())
    }
}

impl<C> std::fmt::Debug for CellRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellRegistry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
