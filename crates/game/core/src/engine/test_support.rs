//! Small in-crate tables for unit tests.

use crate::config::GameConfig;
use crate::env::{
    CatalogOracle, CorporationTemplate, Env, GameEnv, MarketCell, MarketOracle, MarketZone,
    PhaseConfig, PhaseOracle, PrivateTemplate, TileColor,
};
use crate::state::{CorporationId, GameState, GridPosition, PlayerId, PrivateId};

const FOUNDING_COLUMN_PRICES: [u32; 8] = [100, 90, 82, 76, 71, 67, 65, 63];
const PAR_VALUES: [u32; 6] = [100, 90, 82, 76, 71, 67];

pub(crate) struct Fixture {
    catalog: FixtureCatalog,
    market: FixtureMarket,
    phases: FixturePhases,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self {
            catalog: FixtureCatalog::new(),
            market: FixtureMarket,
            phases: FixturePhases::new(),
        }
    }

    pub(crate) fn env(&self) -> GameEnv<'_> {
        Env::with_all(&self.catalog, &self.market, &self.phases).into_game_env()
    }

    pub(crate) fn state(&self, players: usize) -> GameState {
        let names: Vec<String> = (0..players).map(|seat| format!("player{seat}")).collect();
        GameState::new_game(&names, &self.env(), &GameConfig::with_notification_stagger(0))
            .expect("fixture game")
    }
}

pub(crate) fn fixture_state(players: usize) -> GameState {
    Fixture::new().state(players)
}

pub(crate) fn p(seat: u8) -> PlayerId {
    PlayerId(seat)
}

struct FixtureCatalog {
    corporations: Vec<CorporationTemplate>,
    privates: Vec<PrivateTemplate>,
}

impl FixtureCatalog {
    fn new() -> Self {
        Self {
            corporations: vec![
                CorporationTemplate::new(CorporationId(0), "Pennsylvania", "PRR", "green"),
                CorporationTemplate::new(CorporationId(1), "New York Central", "NYC", "black"),
                CorporationTemplate::new(CorporationId(2), "Erie", "ERIE", "yellow"),
            ],
            privates: [20, 40, 70, 110, 160, 220]
                .into_iter()
                .enumerate()
                .map(|(index, cost)| {
                    PrivateTemplate::new(
                        PrivateId(index as u8),
                        format!("Private {cost}"),
                        cost,
                        cost / 4,
                        "",
                    )
                })
                .collect(),
        }
    }
}

impl CatalogOracle for FixtureCatalog {
    fn corporations(&self) -> &[CorporationTemplate] {
        &self.corporations
    }

    fn private_companies(&self) -> &[PrivateTemplate] {
        &self.privates
    }

    fn certificate_limit(&self, player_count: usize) -> Option<usize> {
        match player_count {
            3 => Some(20),
            4 => Some(16),
            5 => Some(13),
            6 => Some(11),
            _ => None,
        }
    }

    fn starting_cash(&self, player_count: usize) -> Option<u32> {
        match player_count {
            3 => Some(800),
            4 => Some(600),
            5 => Some(480),
            6 => Some(400),
            _ => None,
        }
    }

    fn bank_total(&self) -> u32 {
        12_000
    }
}

/// Only the founding column is populated; row 8 is an illegal floor square.
struct FixtureMarket;

impl MarketOracle for FixtureMarket {
    fn columns(&self) -> u8 {
        10
    }

    fn rows(&self) -> u8 {
        9
    }

    fn cell(&self, position: GridPosition) -> Option<MarketCell> {
        if position.column != GameConfig::FOUNDING_COLUMN {
            return None;
        }
        FOUNDING_COLUMN_PRICES
            .get(position.row as usize)
            .map(|price| MarketCell::new(*price, MarketZone::Normal))
    }

    fn par_row(&self, par_value: u32) -> Option<u8> {
        PAR_VALUES
            .iter()
            .position(|value| *value == par_value)
            .map(|row| row as u8)
    }

    fn par_values(&self) -> Vec<u32> {
        PAR_VALUES.to_vec()
    }
}

struct FixturePhases {
    phases: Vec<PhaseConfig>,
}

impl FixturePhases {
    fn new() -> Self {
        let phase = |name: &str, operating_rounds: u8| PhaseConfig {
            name: name.to_string(),
            train: name.to_string(),
            train_count: 4,
            train_cost: 80,
            tile_colors: vec![TileColor::Yellow],
            operating_rounds,
            obsoletes: None,
        };
        Self {
            phases: vec![phase("2", 1), phase("3", 2)],
        }
    }
}

impl PhaseOracle for FixturePhases {
    fn phases(&self) -> &[PhaseConfig] {
        &self.phases
    }
}
