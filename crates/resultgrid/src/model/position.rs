//! Section/item coordinates for addressing entities in a result set.
//!
//! A `Position` is only meaningful against the provider's shape at the moment
//! it is used. Positions should not be stored across result-set mutations.

use std::fmt;

/// A (section, item) coordinate in a sectioned result set.
///
/// Positions order section-major: every item of section 0 sorts before any
/// item of section 1.
///
/// # Example
///
/// ```
/// use resultgrid::model::Position;
///
/// let pos = Position::new(0, 2);
/// assert_eq!(pos.section(), 0);
/// assert_eq!(pos.item(), 2);
/// assert_eq!(pos.to_string(), "[0, 2]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    section: usize,
    item: usize,
}

impl Position {
    /// Creates a position.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Returns the position of another item in the same section.
    #[inline]
    pub const fn sibling(&self, item: usize) -> Self {
        Self::new(self.section, item)
    }
}

impl From<(usize, usize)> for Position {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}
