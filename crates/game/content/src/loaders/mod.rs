//! Content loaders for reading game data from files.
//!
//! Each loader parses one data file into the same table type the built-in
//! [`crate::tables`] constructors produce, then checks it for consistency.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod market;
pub mod phases;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use market::MarketLoader;
pub use phases::PhaseLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
