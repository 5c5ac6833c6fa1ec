//! Data-driven content definitions and loaders.
//!
//! This crate houses the static game tables and provides loaders for TOML/RON
//! data files:
//! - Corporation and private-company catalog, seating rules (TOML)
//! - Stock-market price and zone grid (RON)
//! - Phase table (RON)
//! - Game configuration (TOML)
//!
//! Content is consumed through the rail-core oracle traits and never appears
//! in game state.

pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::{BANK_TOTAL, Catalog, MarketGrid, MarketGridError, PhaseTable, SeatingRule, Tables};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogLoader, ConfigLoader, ContentFactory, MarketLoader, PhaseLoader};
