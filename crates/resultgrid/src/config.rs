//! Adapter configuration.
//!
//! Owners that keep their grid setup in a TOML file can load the adapter's
//! settings with [`AdapterConfig::load`]:
//!
//! ```toml
//! cell_identifier = "PhotoCell"
//! ```

use std::path::Path;

use resultgrid_core::logging::targets;
use serde::Deserialize;

use crate::error::{GridError, Result};

/// Settings used to construct a [`ResultSetGridAdapter`](crate::model::ResultSetGridAdapter).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    /// Identifier of the reusable cell type requested from the grid.
    pub cell_identifier: String,
}

impl AdapterConfig {
    /// Creates a configuration for `cell_identifier`.
    pub fn new(cell_identifier: impl Into<String>) -> Self {
        Self {
            cell_identifier: cell_identifier.into(),
        }
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| GridError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), identifier = %config.cell_identifier, "loaded adapter config");
        Ok(config)
    }

    /// Checks the values that cannot be expressed in the type.
    pub fn validate(&self) -> Result<()> {
        if self.cell_identifier.is_empty() {
            return Err(GridError::EmptyCellIdentifier);
        }
        Ok(())
    }
}
