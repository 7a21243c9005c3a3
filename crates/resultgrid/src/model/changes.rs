//! Content change records.
//!
//! A provider reports each mutation as a [`ContentChange`]. Observers collect
//! the changes of one change unit into a [`ChangeSet`] and replay it onto the
//! grid in a single batch.

use super::position::Position;

/// A single section or item mutation.
///
/// Each change is expressed against the layout left by the changes recorded
/// before it in the same unit. Insertions and updates name the position the
/// item occupies once applied; deletions name the position it occupied just
/// before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentChange {
    /// A section was inserted at this index.
    SectionInserted(usize),
    /// The section at this index was removed.
    SectionDeleted(usize),
    /// An item was inserted at this position.
    ItemInserted(Position),
    /// The item at this position was removed.
    ItemDeleted(Position),
    /// The item at this position was replaced in place.
    ItemUpdated(Position),
    /// An item moved between positions.
    ItemMoved { from: Position, to: Position },
}

/// The changes of one change unit, in the order they were applied.
///
/// Positions inside a unit depend on each other, so consumers must replay
/// [`changes`](Self::changes) front to back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    changes: Vec<ContentChange>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a change after every change already recorded.
    pub fn push(&mut self, change: ContentChange) {
        self.changes.push(change);
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Returns the number of recorded changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Removes every recorded change.
    pub fn clear(&mut self) {
        self.changes.clear();
    }

    /// The recorded changes in application order.
    pub fn changes(&self) -> &[ContentChange] {
        &self.changes
    }

    /// Iterates over the recorded changes in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContentChange> {
        self.changes.iter()
    }

    /// Returns `true` if any change adds or removes a section.
    pub fn touches_sections(&self) -> bool {
        self.changes.iter().any(|change| {
            matches!(
                change,
                ContentChange::SectionInserted(_) | ContentChange::SectionDeleted(_)
            )
        })
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ContentChange;
    type IntoIter = std::slice::Iter<'a, ContentChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<ContentChange> for ChangeSet {
    fn extend<I: IntoIterator<Item = ContentChange>>(&mut self, iter: I) {
        self.changes.extend(iter);
    }
}

impl FromIterator<ContentChange> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = ContentChange>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}
