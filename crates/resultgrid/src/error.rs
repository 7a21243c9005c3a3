//! Error types for resultgrid.

use std::path::PathBuf;

use crate::model::Position;

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors produced by result providers, grid surfaces and the adapter.
///
/// Out-of-bounds access and misregistered identifiers are programming errors
/// in the owner of the adapter. The adapter never recovers from them; it
/// returns whatever the collaborator produced.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The result provider has not completed its initial fetch.
    #[error("Result set has not been loaded yet")]
    NotLoaded,

    /// A section index outside the provider's current shape.
    #[error("Section {section} is out of bounds (section count is {count})")]
    SectionOutOfBounds { section: usize, count: usize },

    /// An item index outside its section.
    #[error("Item at {position} is out of bounds (section has {count} items)")]
    ItemOutOfBounds { position: Position, count: usize },

    /// The grid surface has no cell type registered under this identifier.
    #[error("No cell type registered for identifier '{0}'")]
    UnregisteredCellIdentifier(String),

    /// A cell identifier must be non-empty.
    #[error("Cell identifier must not be empty")]
    EmptyCellIdentifier,

    /// Configuration could not be parsed.
    #[error("Invalid adapter configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("Failed to read configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GridError {
    /// Create a section bounds error.
    pub fn section_out_of_bounds(section: usize, count: usize) -> Self {
        Self::SectionOutOfBounds { section, count }
    }

    /// Create an item bounds error.
    pub fn item_out_of_bounds(position: Position, count: usize) -> Self {
        Self::ItemOutOfBounds { position, count }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors caused by a stale or invalid position.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(
            self,
            Self::SectionOutOfBounds { .. } | Self::ItemOutOfBounds { .. }
        )
    }
}
