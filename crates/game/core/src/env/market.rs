use crate::config::GameConfig;
use crate::state::GridPosition;

/// Oracle providing the stock-market price grid.
///
/// The grid is addressed as `(column, row)` with row 0 at the top. Some cells
/// are illegal squares; [`MarketOracle::cell`] returns `None` for those and
/// for anything outside the grid, which is what turns the ends of a column
/// into a floor and a ceiling.
pub trait MarketOracle: Send + Sync {
    fn columns(&self) -> u8;

    fn rows(&self) -> u8;

    /// Price and zone at `position`, or `None` for an illegal or out-of-bounds square.
    fn cell(&self, position: GridPosition) -> Option<MarketCell>;

    /// Row holding `par_value` in the founding column, if it is a permitted par value.
    fn par_row(&self, par_value: u32) -> Option<u8>;

    /// Permitted par values, highest first.
    fn par_values(&self) -> Vec<u32>;

    /// Column every corporation starts in.
    fn founding_column(&self) -> u8 {
        GameConfig::FOUNDING_COLUMN
    }

    fn contains(&self, position: GridPosition) -> bool {
        position.column < self.columns() && position.row < self.rows()
    }
}

/// One legal square of the stock market.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketCell {
    pub price: u32,
    pub zone: MarketZone,
}

impl MarketCell {
    pub const fn new(price: u32, zone: MarketZone) -> Self {
        Self { price, zone }
    }
}

/// Color classification of a market square.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MarketZone {
    #[default]
    Normal,
    /// Certificates here do not count toward the certificate limit in the
    /// printed rules; the engine only reports the color.
    Yellow,
    Orange,
    Brown,
}
