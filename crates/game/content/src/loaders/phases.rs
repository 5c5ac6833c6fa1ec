//! Phase table loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::PhaseTable;

/// Loader for the phase table from RON files.
pub struct PhaseLoader;

impl PhaseLoader {
    pub fn load(path: &Path) -> LoadResult<PhaseTable> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid phase table {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<PhaseTable> {
        let table: PhaseTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse phase RON: {}", e))?;
        anyhow::ensure!(!table.phases.is_empty(), "phase table is empty");
        anyhow::ensure!(
            table.phases.iter().all(|phase| phase.operating_rounds > 0),
            "every phase needs at least one operating round"
        );
        Ok(table)
    }
}
