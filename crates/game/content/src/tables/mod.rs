//! Built-in rule tables and their oracle implementations.
mod catalog;
mod market;
mod phases;

pub use catalog::{BANK_TOTAL, Catalog, SeatingRule};
pub use market::{MarketGrid, MarketGridError};
pub use phases::PhaseTable;

use rail_core::{Env, GameEnv};

/// The three tables a game needs, owned together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tables {
    pub catalog: Catalog,
    pub market: MarketGrid,
    pub phases: PhaseTable,
}

impl Tables {
    pub fn new(catalog: Catalog, market: MarketGrid, phases: PhaseTable) -> Self {
        Self {
            catalog,
            market,
            phases,
        }
    }

    pub fn standard() -> Self {
        Self::new(
            Catalog::standard(),
            MarketGrid::standard(),
            PhaseTable::standard(),
        )
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.catalog, &self.market, &self.phases).into_game_env()
    }
}
