//! Adapter binding a result provider to a grid surface.
//!
//! [`ResultSetGridAdapter`] translates grid queries ("how many sections", "how
//! many items", "give me a cell") into result provider lookups, and populates
//! each dequeued cell through a caller-supplied configuration callback.
//!
//! The adapter keeps no state of its own besides its two collaborators, the
//! cell identifier and the callback. Every call reads the provider's current
//! snapshot, so it stays valid while the result set is fetched or mutated
//! between calls.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use resultgrid::model::{
//!     CellRegistry, Position, ResultSetGridAdapter, Section, SectionedResults,
//! };
//!
//! let grid = Arc::new(CellRegistry::new(String::new));
//! grid.register_cell_type_with("PhotoCell", String::new);
//!
//! let results = Arc::new(SectionedResults::<&str>::new());
//! results.complete_fetch(vec![Section::new(vec!["sunset", "harbor"])]);
//!
//! let adapter = ResultSetGridAdapter::new(grid, results, "PhotoCell")
//!     .unwrap()
//!     .with_configure_cell(|cell: &mut String, photo: &&str| {
//!         cell.push_str(photo);
//!     });
//!
//! assert!(adapter.data_available());
//! assert_eq!(adapter.section_count(), 1);
//! assert_eq!(adapter.cell_at(Position::new(0, 1)).unwrap(), "harbor");
//! ```

use std::fmt;
use std::sync::Arc;

use resultgrid_core::logging::targets;

use super::position::Position;
use super::traits::{GridDataSource, GridSurface, LoadState, ResultProvider};
use crate::config::AdapterConfig;
use crate::error::{GridError, Result};

/// Type alias for a cell configuration callback.
pub type ConfigureCellFn<C, E> = Arc<dyn Fn(&mut C, &E) + Send + Sync>;

/// Binds a sectioned [`ResultProvider`] to a [`GridSurface`].
///
/// The adapter is constructed once per grid/provider pair. Its configuration
/// callback starts out as a no-op and may be replaced at any time.
pub struct ResultSetGridAdapter<G: GridSurface, P: ResultProvider> {
    grid: Arc<G>,
    provider: Arc<P>,
    cell_identifier: String,
    configure_cell: Option<ConfigureCellFn<G::Cell, P::Entity>>,
}

impl<G: GridSurface, P: ResultProvider> ResultSetGridAdapter<G, P> {
    /// Creates an adapter bound to `grid` and `provider`.
    ///
    /// `cell_identifier` names the reusable cell type requested from the grid
    /// and must be non-empty. No fetch is triggered.
    pub fn new(grid: Arc<G>, provider: Arc<P>, cell_identifier: impl Into<String>) -> Result<Self> {
        let cell_identifier = validate_identifier(cell_identifier.into())?;
        tracing::debug!(target: targets::ADAPTER, identifier = %cell_identifier, "adapter created");
        Ok(Self {
            grid,
            provider,
            cell_identifier,
            configure_cell: None,
        })
    }

    /// Creates an adapter using the identifier from `config`.
    pub fn from_config(grid: Arc<G>, provider: Arc<P>, config: &AdapterConfig) -> Result<Self> {
        Self::new(grid, provider, config.cell_identifier.clone())
    }

    /// Sets the configuration callback using builder pattern.
    pub fn with_configure_cell<F>(mut self, configure: F) -> Self
    where
        F: Fn(&mut G::Cell, &P::Entity) + Send + Sync + 'static,
    {
        self.set_configure_cell(configure);
        self
    }

    /// Replaces the configuration callback.
    pub fn set_configure_cell<F>(&mut self, configure: F)
    where
        F: Fn(&mut G::Cell, &P::Entity) + Send + Sync + 'static,
    {
        self.configure_cell = Some(Arc::new(configure));
    }

    /// Replaces the configuration callback with a shared one.
    pub fn set_configure_cell_shared(&mut self, configure: ConfigureCellFn<G::Cell, P::Entity>) {
        self.configure_cell = Some(configure);
    }

    /// Restores the no-op configuration callback.
    pub fn clear_configure_cell(&mut self) {
        self.configure_cell = None;
    }

    /// Returns `true` if a configuration callback is installed.
    pub fn has_configure_cell(&self) -> bool {
        self.configure_cell.is_some()
    }

    /// Returns the identifier used to dequeue cells.
    pub fn cell_identifier(&self) -> &str {
        &self.cell_identifier
    }

    /// Changes the identifier used to dequeue cells.
    ///
    /// The previous identifier is kept if `identifier` is empty.
    pub fn set_cell_identifier(&mut self, identifier: impl Into<String>) -> Result<()> {
        self.cell_identifier = validate_identifier(identifier.into())?;
        Ok(())
    }

    /// Returns the bound grid surface.
    pub fn grid(&self) -> &Arc<G> {
        &self.grid
    }

    /// Returns the bound result provider.
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }

    /// Returns `true` once the provider has completed its initial fetch.
    ///
    /// Owners use this to tell "empty result set" apart from "not loaded yet".
    pub fn data_available(&self) -> bool {
        self.provider.is_loaded()
    }

    /// Returns the provider's detailed fetch state.
    pub fn load_state(&self) -> LoadState {
        self.provider.load_state()
    }

    /// Returns the number of sections, or `0` while no data is available.
    pub fn section_count(&self) -> usize {
        if !self.data_available() {
            return 0;
        }
        self.provider.section_count()
    }

    /// Returns the number of items in `section`, as reported by the provider.
    ///
    /// Out-of-bounds sections are not clamped; the provider's error is
    /// returned unchanged.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        self.provider.item_count(section)
    }

    /// Returns the display name of `section`, if the provider has one.
    pub fn section_name(&self, section: usize) -> Result<Option<String>> {
        self.provider.section_name(section)
    }

    /// Returns the entity at `position`, as reported by the provider.
    pub fn entity_at(&self, position: Position) -> Result<P::Entity> {
        self.provider.entity_at(position)
    }

    /// Returns a cell for `position`, populated by the configuration callback.
    ///
    /// The cell is dequeued from the grid first, then the entity is resolved,
    /// then the callback runs exactly once with both. Failures from either
    /// collaborator end the call before the callback runs.
    pub fn cell_at(&self, position: Position) -> Result<G::Cell> {
        let mut cell = self
            .grid
            .dequeue_reusable_cell(&self.cell_identifier, position)?;
        let entity = self.entity_at(position)?;

        if let Some(configure) = &self.configure_cell {
            configure(&mut cell, &entity);
            tracing::trace!(
                target: targets::ADAPTER,
                %position,
                identifier = %self.cell_identifier,
                "configured cell"
            );
        }
        Ok(cell)
    }
}

impl<G: GridSurface, P: ResultProvider> GridDataSource for ResultSetGridAdapter<G, P> {
    type Cell = G::Cell;

    fn number_of_sections(&self) -> usize {
        self.section_count()
    }

    fn number_of_items(&self, section: usize) -> Result<usize> {
        self.item_count(section)
    }

    fn cell_for_item(&self, position: Position) -> Result<G::Cell> {
        self.cell_at(position)
    }
}

impl<G: GridSurface, P: ResultProvider> fmt::Debug for ResultSetGridAdapter<G, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSetGridAdapter")
            .field("cell_identifier", &self.cell_identifier)
            .field("has_configure_cell", &self.has_configure_cell())
            .finish_non_exhaustive()
    }
}

fn validate_identifier(identifier: String) -> Result<String> {
    if identifier.is_empty() {
        return Err(GridError::EmptyCellIdentifier);
    }
    Ok(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    /// Provider with fixed per-section counts; entities are labelled by position.
    struct FakeProvider {
        counts: Vec<usize>,
        loaded: bool,
        log: Log,
        section_queries: Mutex<usize>,
    }

    impl FakeProvider {
        fn new(counts: Vec<usize>, loaded: bool, log: Log) -> Self {
            Self {
                counts,
                loaded,
                log,
                section_queries: Mutex::new(0),
            }
        }
    }

    impl ResultProvider for FakeProvider {
        type Entity = String;

        fn section_count(&self) -> usize {
            *self.section_queries.lock() += 1;
            self.counts.len()
        }

        fn item_count(&self, section: usize) -> Result<usize> {
            self.counts
                .get(section)
                .copied()
                .ok_or(GridError::section_out_of_bounds(section, self.counts.len()))
        }

        fn entity_at(&self, position: Position) -> Result<String> {
            self.log.lock().push(format!("entity {position}"));
            let count = self.item_count(position.section())?;
            if position.item() >= count {
                return Err(GridError::item_out_of_bounds(position, count));
            }
            Ok(format!("E{}.{}", position.section(), position.item()))
        }

        fn is_loaded(&self) -> bool {
            self.loaded
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct FakeCell {
        serial: usize,
        title: Option<String>,
    }

    struct RecordingGrid {
        registered: Mutex<Vec<String>>,
        dequeued: Mutex<Vec<(String, Position)>>,
        log: Log,
    }

    impl RecordingGrid {
        fn new(log: Log) -> Self {
            Self {
                registered: Mutex::new(Vec::new()),
                dequeued: Mutex::new(Vec::new()),
                log,
            }
        }
    }

    impl GridSurface for RecordingGrid {
        type Cell = FakeCell;

        fn register_cell_type(&self, identifier: &str) {
            self.registered.lock().push(identifier.to_string());
        }

        fn dequeue_reusable_cell(&self, identifier: &str, position: Position) -> Result<FakeCell> {
            if !self.registered.lock().iter().any(|id| id == identifier) {
                return Err(GridError::UnregisteredCellIdentifier(identifier.to_string()));
            }
            self.log.lock().push(format!("dequeue {identifier} {position}"));
            let mut dequeued = self.dequeued.lock();
            dequeued.push((identifier.to_string(), position));
            Ok(FakeCell {
                serial: dequeued.len(),
                title: None,
            })
        }
    }

    fn fixture(
        counts: Vec<usize>,
        loaded: bool,
    ) -> (ResultSetGridAdapter<RecordingGrid, FakeProvider>, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let grid = Arc::new(RecordingGrid::new(log.clone()));
        grid.register_cell_type("Cell");
        let provider = Arc::new(FakeProvider::new(counts, loaded, log.clone()));
        let adapter = ResultSetGridAdapter::new(grid, provider, "Cell").unwrap();
        (adapter, log)
    }

    #[test]
    fn test_counts_when_loaded() {
        let (adapter, _) = fixture(vec![3, 1], true);
        assert!(adapter.data_available());
        assert_eq!(adapter.section_count(), 2);
        assert_eq!(adapter.item_count(0).unwrap(), 3);
        assert_eq!(adapter.item_count(1).unwrap(), 1);
    }

    #[test]
    fn test_section_count_zero_until_loaded() {
        let (adapter, _) = fixture(vec![3, 1], false);
        assert!(!adapter.data_available());
        assert_eq!(adapter.load_state(), LoadState::NotStarted);
        assert_eq!(adapter.section_count(), 0);
        assert_eq!(*adapter.provider().section_queries.lock(), 0);
    }

    #[test]
    fn test_cell_at_dequeues_then_configures_once() {
        let (mut adapter, log) = fixture(vec![3, 1], true);
        let calls = Arc::new(Mutex::new(Vec::new()));

        let calls_clone = calls.clone();
        let log_clone = log.clone();
        adapter.set_configure_cell(move |cell: &mut FakeCell, entity: &String| {
            log_clone.lock().push("configure".to_string());
            calls_clone.lock().push((cell.clone(), entity.clone()));
            cell.title = Some(entity.clone());
        });

        let position = Position::new(0, 2);
        let cell = adapter.cell_at(position).unwrap();

        assert_eq!(
            *adapter.grid().dequeued.lock(),
            vec![("Cell".to_string(), position)]
        );
        let calls = calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.serial, 1);
        assert_eq!(calls[0].1, "E0.2");
        assert_eq!(cell.title.as_deref(), Some("E0.2"));
        assert_eq!(
            *log.lock(),
            vec![
                "dequeue Cell [0, 2]".to_string(),
                "entity [0, 2]".to_string(),
                "configure".to_string(),
            ]
        );
    }

    #[test]
    fn test_cell_at_is_idempotent() {
        let (adapter, _) = fixture(vec![2], true);
        let adapter = adapter.with_configure_cell(|cell: &mut FakeCell, entity: &String| {
            cell.title = Some(entity.to_uppercase());
        });

        let first = adapter.cell_at(Position::new(0, 1)).unwrap();
        let second = adapter.cell_at(Position::new(0, 1)).unwrap();

        assert_ne!(first.serial, second.serial);
        assert_eq!(first.title, second.title);
    }

    #[test]
    fn test_entity_at_passes_through() {
        let (adapter, _) = fixture(vec![3, 1], true);
        for section in 0..adapter.section_count() {
            for item in 0..adapter.item_count(section).unwrap() {
                let position = Position::new(section, item);
                assert_eq!(
                    adapter.entity_at(position).unwrap(),
                    adapter.provider().entity_at(position).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_default_callback_is_noop() {
        let (adapter, _) = fixture(vec![1], true);
        assert!(!adapter.has_configure_cell());
        let cell = adapter.cell_at(Position::new(0, 0)).unwrap();
        assert_eq!(cell.title, None);
    }

    #[test]
    fn test_provider_errors_propagate() {
        let (adapter, _) = fixture(vec![3, 1], true);
        assert!(matches!(
            adapter.item_count(5),
            Err(GridError::SectionOutOfBounds { section: 5, count: 2 })
        ));

        let err = adapter.entity_at(Position::new(1, 4)).unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_failed_lookup_skips_callback() {
        let (adapter, _) = fixture(vec![1], true);
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        let adapter = adapter.with_configure_cell(move |_: &mut FakeCell, _: &String| {
            *calls_clone.lock() += 1;
        });

        assert!(adapter.cell_at(Position::new(0, 9)).is_err());
        assert_eq!(*calls.lock(), 0);
    }

    #[test]
    fn test_unregistered_identifier_propagates() {
        let (mut adapter, _) = fixture(vec![1], true);
        adapter.set_cell_identifier("Missing").unwrap();

        let err = adapter.cell_at(Position::new(0, 0)).unwrap_err();
        assert!(matches!(err, GridError::UnregisteredCellIdentifier(id) if id == "Missing"));
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let grid = Arc::new(RecordingGrid::new(log.clone()));
        let provider = Arc::new(FakeProvider::new(vec![], true, log));
        assert!(matches!(
            ResultSetGridAdapter::new(grid, provider, ""),
            Err(GridError::EmptyCellIdentifier)
        ));

        let (mut adapter, _) = fixture(vec![1], true);
        assert!(adapter.set_cell_identifier("").is_err());
        assert_eq!(adapter.cell_identifier(), "Cell");
    }

    #[test]
    fn test_clear_configure_cell() {
        let (adapter, _) = fixture(vec![1], true);
        let mut adapter = adapter.with_configure_cell(|cell: &mut FakeCell, _: &String| {
            cell.title = Some("set".into());
        });
        adapter.clear_configure_cell();
        assert_eq!(adapter.cell_at(Position::new(0, 0)).unwrap().title, None);
    }

    #[test]
    fn test_shared_callback_serves_two_adapters() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let shared: ConfigureCellFn<FakeCell, String> =
            Arc::new(move |cell: &mut FakeCell, entity: &String| {
                calls_clone.lock().push(entity.clone());
                cell.title = Some(entity.clone());
            });

        let (mut first, _) = fixture(vec![1], true);
        let (mut second, _) = fixture(vec![2], true);
        first.set_configure_cell_shared(shared.clone());
        second.set_configure_cell_shared(shared.clone());
        assert!(first.has_configure_cell() && second.has_configure_cell());
        assert_eq!(Arc::strong_count(&shared), 3);

        assert_eq!(
            first.cell_at(Position::new(0, 0)).unwrap().title.as_deref(),
            Some("E0.0")
        );
        assert_eq!(
            second.cell_at(Position::new(0, 1)).unwrap().title.as_deref(),
            Some("E0.1")
        );
        assert_eq!(*calls.lock(), vec!["E0.0".to_string(), "E0.1".to_string()]);
    }

    #[test]
    fn test_grid_data_source_delegates() {
        let (adapter, _) = fixture(vec![3, 1], true);
        let source: &dyn GridDataSource<Cell = FakeCell> = &adapter;
        assert_eq!(source.number_of_sections(), 2);
        assert_eq!(source.number_of_items(0).unwrap(), 3);
        assert!(source.cell_for_item(Position::new(1, 0)).is_ok());
    }
}
