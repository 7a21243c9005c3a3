//! Collaborator traits for binding a result set to a grid.
//!
//! The adapter sits between two externally owned components:
//!
//! - a [`ResultProvider`], which exposes a sectioned, ordered result set
//! - a [`GridSurface`], which hands out reusable cells by identifier
//!
//! and exposes itself to the grid through [`GridDataSource`]. Observers that
//! keep the grid in sync with a changing provider use [`ObservableResults`]
//! and [`GridUpdates`].

use resultgrid_core::Signal;

use super::changes::{ChangeSet, ContentChange};
use super::position::Position;
use crate::error::Result;

/// Fetch progress of a result provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// The initial fetch has not completed.
    #[default]
    NotStarted,
    /// The provider has a valid section/item structure.
    Loaded,
    /// The initial fetch failed; the provider reports no content.
    Failed,
}

impl LoadState {
    /// Returns `true` if the provider has content to report.
    pub fn is_loaded(self) -> bool {
        self == Self::Loaded
    }
}

/// A live, sectioned, ordered view over query results.
///
/// Every method reads the provider's current snapshot. Implementations must
/// not assume callers cache counts or entities between calls.
///
/// # Example
///
/// ```
/// use resultgrid::model::{Position, ResultProvider};
/// use resultgrid::{GridError, Result};
///
/// struct Words(Vec<&'static str>);
///
/// impl ResultProvider for Words {
///     type Entity = &'static str;
///
///     fn section_count(&self) -> usize {
///         1
///     }
///
///     fn item_count(&self, section: usize) -> Result<usize> {
///         match section {
///             0 => Ok(self.0.len()),
///             _ => Err(GridError::section_out_of_bounds(section, 1)),
///         }
///     }
///
///     fn entity_at(&self, position: Position) -> Result<Self::Entity> {
///         let count = self.item_count(position.section())?;
///         self.0
///             .get(position.item())
///             .copied()
///             .ok_or_else(|| GridError::item_out_of_bounds(position, count))
///     }
///
///     fn is_loaded(&self) -> bool {
///         true
///     }
/// }
/// ```
pub trait ResultProvider {
    /// The domain object stored at each position.
    type Entity;

    /// Returns the number of sections in the current snapshot.
    fn section_count(&self) -> usize;

    /// Returns the number of items in `section`.
    ///
    /// Returns `SectionOutOfBounds` for a section outside the current shape.
    fn item_count(&self, section: usize) -> Result<usize>;

    /// Returns the entity at `position`.
    fn entity_at(&self, position: Position) -> Result<Self::Entity>;

    /// Returns `true` once the initial fetch has completed.
    fn is_loaded(&self) -> bool;

    // -------------------------------------------------------------------------
    // Optional methods with default implementations
    // -------------------------------------------------------------------------

    /// Returns the detailed fetch state.
    ///
    /// The default derives it from [`is_loaded`](Self::is_loaded), so providers
    /// that cannot fail report only `NotStarted` or `Loaded`.
    fn load_state(&self) -> LoadState {
        if self.is_loaded() {
            LoadState::Loaded
        } else {
            LoadState::NotStarted
        }
    }

    /// Returns the display name of `section`, if it has one.
    fn section_name(&self, section: usize) -> Result<Option<String>> {
        self.item_count(section).map(|_| None)
    }
}

/// A presentation surface that produces reusable cells by identifier.
pub trait GridSurface {
    /// The reusable visual object populated for each position.
    type Cell;

    /// Registers a cell type under `identifier`.
    ///
    /// Owners call this before handing the surface to an adapter.
    fn register_cell_type(&self, identifier: &str);

    /// Returns a cell of the type registered under `identifier`, ready to be
    /// configured for `position`.
    ///
    /// Fails with `UnregisteredCellIdentifier` if nothing was registered.
    fn dequeue_reusable_cell(&self, identifier: &str, position: Position) -> Result<Self::Cell>;
}

/// The capability set a grid surface calls into to obtain its content.
pub trait GridDataSource {
    /// The cell type handed back to the grid.
    type Cell;

    /// Returns the number of sections to display.
    fn number_of_sections(&self) -> usize;

    /// Returns the number of items to display in `section`.
    fn number_of_items(&self, section: usize) -> Result<usize>;

    /// Returns a fully configured cell for `position`.
    fn cell_for_item(&self, position: Position) -> Result<Self::Cell>;
}

/// A grid that can be refreshed after its content changed.
pub trait GridUpdates {
    /// Discards everything displayed and re-queries the data source.
    fn reload_data(&self);

    /// Applies one unit of section/item changes.
    fn perform_batch_updates(&self, changes: &ChangeSet);
}

/// A result provider that announces content changes.
pub trait ObservableResults {
    /// Returns the provider's change signals.
    fn result_signals(&self) -> &ResultSignals;
}

/// Signals emitted by an observable result provider.
///
/// # Signal Usage
///
/// - **Before a change unit**: `will_change_content`
/// - **Per mutation**: `content_changed`, after the mutation is visible
/// - **After a change unit**: `did_change_content`
/// - **Fetch completed or failed**: `content_reset`, with the new load state
pub struct ResultSignals {
    /// Emitted before a unit of mutations is applied.
    pub will_change_content: Signal<()>,

    /// Emitted once per section or item mutation.
    pub content_changed: Signal<ContentChange>,

    /// Emitted after a unit of mutations has been applied.
    pub did_change_content: Signal<()>,

    /// Emitted when the whole content was replaced.
    pub content_reset: Signal<LoadState>,
}

impl Default for ResultSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSignals {
    /// Creates a new set of result signals.
    pub fn new() -> Self {
        Self {
            will_change_content: Signal::new(),
            content_changed: Signal::new(),
            did_change_content: Signal::new(),
            content_reset: Signal::new(),
        }
    }

    /// Emits a complete change unit.
    ///
    /// Calls `apply` between `will_change_content` and the per-change
    /// signals. `apply` returns its result together with the changes it made;
    /// these are emitted in order, followed by `did_change_content`. The
    /// signals are emitted even when `apply` reports an error, so observers
    /// see every mutation that did happen.
    pub fn emit_change_unit<R, F>(&self, apply: F) -> R
    where
        F: FnOnce() -> (R, Vec<ContentChange>),
    {
        self.will_change_content.emit(());
        let (result, changes) = apply();
        for change in changes {
            self.content_changed.emit(change);
        }
        self.did_change_content.emit(());
        result
    }
}

impl std::fmt::Debug for ResultSignals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSignals").finish_non_exhaustive()
    }
}
