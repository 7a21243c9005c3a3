//! In-memory sectioned result provider.
//!
//! `SectionedResults<T>` plays the role of a fetched-results controller: it
//! holds a list of [`Section`]s, tracks whether the initial fetch completed,
//! and announces every mutation through [`ResultSignals`].
//!
//! # Example
//!
//! ```
//! use resultgrid::model::{Position, ResultProvider, Section, SectionedResults};
//!
//! let results: SectionedResults<(&str, &str)> = SectionedResults::new();
//! assert!(!results.is_loaded());
//!
//! results.complete_fetch(Section::group_consecutive(
//!     vec![("2013", "harbor"), ("2013", "sunset"), ("2014", "bridge")],
//!     |photo| photo.0,
//! ));
//!
//! assert_eq!(results.section_count(), 2);
//! assert_eq!(results.section_name(1).unwrap().as_deref(), Some("2014"));
//!
//! results.insert_item(Position::new(1, 1), ("2014", "tower")).unwrap();
//! assert_eq!(results.item_count(1).unwrap(), 2);
//! ```

use parking_lot::RwLock;
use resultgrid_core::PerfSpan;
use resultgrid_core::logging::targets;

use super::changes::ContentChange;
use super::position::Position;
use super::traits::{LoadState, ObservableResults, ResultProvider, ResultSignals};
use crate::error::{GridError, Result};

/// One section of a result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<T> {
    name: Option<String>,
    index_title: Option<String>,
    items: Vec<T>,
}

impl<T> Section<T> {
    /// Creates an unnamed section.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            name: None,
            index_title: None,
            items,
        }
    }

    /// Creates a named section.
    pub fn named(name: impl Into<String>, items: Vec<T>) -> Self {
        Self {
            name: Some(name.into()),
            index_title: None,
            items,
        }
    }

    /// Sets the short title shown in a section index.
    pub fn with_index_title(mut self, title: impl Into<String>) -> Self {
        self.index_title = Some(title.into());
        self
    }

    /// Returns the section name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the section index title.
    pub fn index_title(&self) -> Option<&str> {
        self.index_title.as_deref()
    }

    /// Returns the items in order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the section has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Splits already-ordered items into named sections.
    ///
    /// Consecutive items with equal keys share a section named after the key.
    /// Items are not reordered, so unsorted input yields repeated section
    /// names.
    pub fn group_consecutive<K, F>(items: impl IntoIterator<Item = T>, key: F) -> Vec<Section<T>>
    where
        K: PartialEq + ToString,
        F: Fn(&T) -> K,
    {
        let mut sections: Vec<Section<T>> = Vec::new();
        let mut current_key: Option<K> = None;

        for item in items {
            let item_key = key(&item);
            match sections.last_mut() {
                Some(section) if current_key.as_ref() == Some(&item_key) => {
                    section.items.push(item);
                }
                _ => {
                    sections.push(Section::named(item_key.to_string(), vec![item]));
                    current_key = Some(item_key);
                }
            }
        }
        sections
    }
}

struct ResultsState<T> {
    sections: Vec<Section<T>>,
    load_state: LoadState,
    failure: Option<String>,
}

/// An in-memory, observable [`ResultProvider`].
///
/// Reads never block on observers: signals are emitted after the internal
/// lock is released, so slots may query the provider.
pub struct SectionedResults<T> {
    state: RwLock<ResultsState<T>>,
    signals: ResultSignals,
}

impl<T> Default for SectionedResults<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SectionedResults<T> {
    /// Creates a provider whose initial fetch has not completed.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ResultsState {
                sections: Vec::new(),
                load_state: LoadState::NotStarted,
                failure: None,
            }),
            signals: ResultSignals::new(),
        }
    }

    /// Creates a provider that is already loaded with `sections`.
    pub fn loaded(sections: Vec<Section<T>>) -> Self {
        let results = Self::new();
        {
            let mut state = results.state.write();
            state.sections = sections;
            state.load_state = LoadState::Loaded;
        }
        results
    }

    /// Returns the change signals.
    pub fn signals(&self) -> &ResultSignals {
        &self.signals
    }

    /// Replaces the content with the result of a completed fetch.
    ///
    /// Emits `content_reset` with [`LoadState::Loaded`].
    pub fn complete_fetch(&self, sections: Vec<Section<T>>) {
        let section_count = sections.len();
        {
            let mut state = self.state.write();
            state.sections = sections;
            state.load_state = LoadState::Loaded;
            state.failure = None;
        }
        tracing::debug!(target: targets::RESULTS, section_count, "fetch completed");
        self.signals.content_reset.emit(LoadState::Loaded);
    }

    /// Records a failed fetch and drops any content.
    ///
    /// Emits `content_reset` with [`LoadState::Failed`].
    pub fn fail_fetch(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: targets::RESULTS, %message, "fetch failed");
        {
            let mut state = self.state.write();
            state.sections.clear();
            state.load_state = LoadState::Failed;
            state.failure = Some(message);
        }
        self.signals.content_reset.emit(LoadState::Failed);
    }

    /// Returns the message of the last failed fetch.
    pub fn failure_message(&self) -> Option<String> {
        self.state.read().failure.clone()
    }

    /// Returns the number of items across all sections.
    pub fn total_count(&self) -> usize {
        self.state.read().sections.iter().map(Section::len).sum()
    }

    /// Applies several mutations as one change unit.
    ///
    /// Observers receive `will_change_content`, one `content_changed` per
    /// mutation that succeeded, then `did_change_content`. If `f` fails,
    /// mutations made before the failure stay applied and are still reported.
    ///
    /// The write lock is held while `f` runs and it is not reentrant. Inside
    /// `f`, read the sections through [`ResultsBatch::section_count`] and
    /// [`ResultsBatch::item_count`]; calling any method of this provider from
    /// `f` on the same thread deadlocks.
    pub fn batch<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut ResultsBatch<'_, T>) -> Result<R>,
    {
        if !self.state.read().load_state.is_loaded() {
            return Err(GridError::NotLoaded);
        }

        let _perf = PerfSpan::new("results_batch");
        self.signals.emit_change_unit(|| {
            let mut state = self.state.write();
            let mut batch = ResultsBatch {
                sections: &mut state.sections,
                changes: Vec::new(),
            };
            let result = f(&mut batch);
            let changes = batch.changes;
            tracing::trace!(target: targets::RESULTS, change_count = changes.len(), "applied batch");
            (result, changes)
        })
    }

    /// Inserts an item. See [`ResultsBatch::insert_item`].
    pub fn insert_item(&self, position: Position, item: T) -> Result<()> {
        self.batch(|b| b.insert_item(position, item))
    }

    /// Removes an item. See [`ResultsBatch::remove_item`].
    pub fn remove_item(&self, position: Position) -> Result<T> {
        self.batch(|b| b.remove_item(position))
    }

    /// Replaces an item. See [`ResultsBatch::update_item`].
    pub fn update_item(&self, position: Position, item: T) -> Result<T> {
        self.batch(|b| b.update_item(position, item))
    }

    /// Moves an item. See [`ResultsBatch::move_item`].
    pub fn move_item(&self, from: Position, to: Position) -> Result<()> {
        self.batch(|b| b.move_item(from, to))
    }

    /// Inserts a section. See [`ResultsBatch::insert_section`].
    pub fn insert_section(&self, index: usize, section: Section<T>) -> Result<()> {
        self.batch(|b| b.insert_section(index, section))
    }

    /// Removes a section. See [`ResultsBatch::remove_section`].
    pub fn remove_section(&self, index: usize) -> Result<Section<T>> {
        self.batch(|b| b.remove_section(index))
    }
}

impl<T: Clone> SectionedResults<T> {
    /// Returns a copy of the current sections.
    pub fn snapshot(&self) -> Vec<Section<T>> {
        self.state.read().sections.clone()
    }
}

impl<T: Clone> ResultProvider for SectionedResults<T> {
    type Entity = T;

    fn section_count(&self) -> usize {
        self.state.read().sections.len()
    }

    fn item_count(&self, section: usize) -> Result<usize> {
        let state = self.state.read();
        section_ref(&state.sections, section).map(Section::len)
    }

    fn entity_at(&self, position: Position) -> Result<T> {
        let state = self.state.read();
        let section = section_ref(&state.sections, position.section())?;
        section
            .items
            .get(position.item())
            .cloned()
            .ok_or_else(|| GridError::item_out_of_bounds(position, section.len()))
    }

    fn is_loaded(&self) -> bool {
        self.state.read().load_state.is_loaded()
    }

    fn load_state(&self) -> LoadState {
        self.state.read().load_state
    }

    fn section_name(&self, section: usize) -> Result<Option<String>> {
        let state = self.state.read();
        section_ref(&state.sections, section).map(|s| s.name.clone())
    }
}

impl<T> ObservableResults for SectionedResults<T> {
    fn result_signals(&self) -> &ResultSignals {
        &self.signals
    }
}

impl<T> std::fmt::Debug for SectionedResults<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SectionedResults")
            .field("load_state", &state.load_state)
            .field("sections", &state.sections.len())
            .finish()
    }
}

/// Mutable access to a provider's sections during one change unit.
///
/// Every method validates its positions before touching anything, so a
/// failed call leaves the sections unchanged.
pub struct ResultsBatch<'a, T> {
    sections: &'a mut Vec<Section<T>>,
    changes: Vec<ContentChange>,
}

impl<T> ResultsBatch<'_, T> {
    /// Returns the current number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the current number of items in `section`.
    pub fn item_count(&self, section: usize) -> Result<usize> {
        section_ref(self.sections.as_slice(), section).map(Section::len)
    }

    /// Inserts `section` at `index` (which may equal the section count).
    pub fn insert_section(&mut self, index: usize, section: Section<T>) -> Result<()> {
        if index > self.sections.len() {
            return Err(GridError::section_out_of_bounds(index, self.sections.len()));
        }
        self.sections.insert(index, section);
        self.changes.push(ContentChange::SectionInserted(index));
        Ok(())
    }

    /// Removes and returns the section at `index`.
    pub fn remove_section(&mut self, index: usize) -> Result<Section<T>> {
        section_ref(self.sections.as_slice(), index)?;
        let section = self.sections.remove(index);
        self.changes.push(ContentChange::SectionDeleted(index));
        Ok(section)
    }

    /// Inserts `item` at `position`; the item index may equal the section length.
    pub fn insert_item(&mut self, position: Position, item: T) -> Result<()> {
        let section = section_mut(self.sections.as_mut_slice(), position.section())?;
        if position.item() > section.len() {
            return Err(GridError::item_out_of_bounds(position, section.len()));
        }
        section.items.insert(position.item(), item);
        self.changes.push(ContentChange::ItemInserted(position));
        Ok(())
    }

    /// Removes and returns the item at `position`.
    pub fn remove_item(&mut self, position: Position) -> Result<T> {
        let section = section_mut(self.sections.as_mut_slice(), position.section())?;
        if position.item() >= section.len() {
            return Err(GridError::item_out_of_bounds(position, section.len()));
        }
        let item = section.items.remove(position.item());
        self.changes.push(ContentChange::ItemDeleted(position));
        Ok(item)
    }

    /// Replaces the item at `position`, returning the previous one.
    pub fn update_item(&mut self, position: Position, item: T) -> Result<T> {
        let section = section_mut(self.sections.as_mut_slice(), position.section())?;
        let count = section.len();
        let slot = section
            .items
            .get_mut(position.item())
            .ok_or_else(|| GridError::item_out_of_bounds(position, count))?;
        let previous = std::mem::replace(slot, item);
        self.changes.push(ContentChange::ItemUpdated(position));
        Ok(previous)
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// `to` is interpreted against the shape after the item was taken out.
    pub fn move_item(&mut self, from: Position, to: Position) -> Result<()> {
        let from_len = section_ref(self.sections.as_slice(), from.section())?.len();
        if from.item() >= from_len {
            return Err(GridError::item_out_of_bounds(from, from_len));
        }
        let to_len = section_ref(self.sections.as_slice(), to.section())?.len();
        let to_len_after = if to.section() == from.section() {
            to_len - 1
        } else {
            to_len
        };
        if to.item() > to_len_after {
            return Err(GridError::item_out_of_bounds(to, to_len_after));
        }

        let item = self.sections[from.section()].items.remove(from.item());
        self.sections[to.section()].items.insert(to.item(), item);
        self.changes.push(ContentChange::ItemMoved { from, to });
        Ok(())
    }
}

fn section_ref<T>(sections: &[Section<T>], section: usize) -> Result<&Section<T>> {
    sections
        .get(section)
        .ok_or_else(|| GridError::section_out_of_bounds(section, sections.len()))
}

fn section_mut<T>(sections: &mut [Section<T>], section: usize) -> Result<&mut Section<T>> {
    let count = sections.len();
    sections
        .get_mut(section)
        .ok_or_else(|| GridError::section_out_of_bounds(section, count))
}
