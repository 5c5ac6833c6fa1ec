//! Content factory for building game tables from data files.

use std::path::{Path, PathBuf};

use crate::loaders::{CatalogLoader, ConfigLoader, LoadResult, MarketLoader, PhaseLoader};
use crate::tables::{Catalog, MarketGrid, PhaseTable, Tables};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── catalog.toml
/// ├── market.ron
/// └── phases.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<rail_core::GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the catalog from `catalog.toml`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load(&self.data_dir.join("catalog.toml"))
    }

    /// Load the stock-market grid from `market.ron`.
    pub fn load_market(&self) -> LoadResult<MarketGrid> {
        MarketLoader::load(&self.data_dir.join("market.ron"))
    }

    /// Load the phase table from `phases.ron`.
    pub fn load_phases(&self) -> LoadResult<PhaseTable> {
        PhaseLoader::load(&self.data_dir.join("phases.ron"))
    }

    /// Load every table. A missing file falls back to the built-in table;
    /// a file that exists but does not parse is an error.
    pub fn load_tables(&self) -> LoadResult<Tables> {
        let catalog = if self.data_dir.join("catalog.toml").exists() {
            self.load_catalog()?
        } else {
            Catalog::standard()
        };
        let market = if self.data_dir.join("market.ron").exists() {
            self.load_market()?
        } else {
            MarketGrid::standard()
        };
        let phases = if self.data_dir.join("phases.ron").exists() {
            self.load_phases()?
        } else {
            PhaseTable::standard()
        };
        Ok(Tables::new(catalog, market, phases))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
