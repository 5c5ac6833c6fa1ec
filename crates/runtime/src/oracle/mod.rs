//! Runtime wrapper around the static game tables.
//!
//! [`OracleManager`] shares the immutable tables between the runtime and its
//! workers and builds [`rail_core::GameEnv`] views on demand. Dynamic state
//! lives in repositories or [`rail_core::GameState`].

use std::sync::Arc;

use rail_content::{Catalog, MarketGrid, PhaseTable, Tables};
use rail_core::{Env, GameEnv};

/// Shared handles to the catalog, market grid and phase table.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) market: Arc<MarketGrid>,
    pub(crate) phases: Arc<PhaseTable>,
}

impl OracleManager {
    pub fn new(catalog: Arc<Catalog>, market: Arc<MarketGrid>, phases: Arc<PhaseTable>) -> Self {
        Self {
            catalog,
            market,
            phases,
        }
    }

    /// The built-in tables of the base game.
    pub fn standard() -> Self {
        Self::from_tables(Tables::standard())
    }

    pub fn from_tables(tables: Tables) -> Self {
        Self::new(
            Arc::new(tables.catalog),
            Arc::new(tables.market),
            Arc::new(tables.phases),
        )
    }

    /// Converts oracle manager into GameEnv for rail-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        Env::with_all(
            self.catalog.as_ref(),
            self.market.as_ref(),
            self.phases.as_ref(),
        )
        .into_game_env()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for OracleManager {
    fn default() -> Self {
        Self::standard()
    }
}
