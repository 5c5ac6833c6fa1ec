//! Stock-market grid loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::MarketGrid;

/// Loader for the stock-market grid from RON files.
pub struct MarketLoader;

impl MarketLoader {
    pub fn load(path: &Path) -> LoadResult<MarketGrid> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid market grid {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<MarketGrid> {
        let grid: MarketGrid = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse market RON: {}", e))?;
        grid.validate()?;
        Ok(grid)
    }
}
