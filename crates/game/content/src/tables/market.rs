//! Stock-market price grid.

use rail_core::{GameConfig, GridPosition, MarketCell, MarketOracle, MarketZone};

const COLUMNS: usize = 10;
const ROWS: usize = 10;

/// Standard prices, indexed `[row][column]`. `0` marks an illegal square.
const STANDARD_PRICES: [[u32; COLUMNS]; ROWS] = [
    [60, 67, 71, 76, 82, 90, 100, 112, 126, 142],
    [53, 60, 66, 70, 76, 82, 90, 100, 112, 126],
    [46, 55, 60, 65, 70, 76, 82, 90, 100, 112],
    [39, 48, 54, 60, 66, 71, 76, 82, 90, 100],
    [32, 41, 48, 55, 62, 67, 71, 76, 82, 90],
    [25, 34, 42, 50, 58, 65, 67, 71, 76, 82],
    [18, 27, 36, 45, 54, 63, 65, 67, 71, 76],
    [10, 20, 30, 40, 50, 60, 63, 65, 67, 71],
    [0, 10, 20, 30, 40, 50, 60, 63, 65, 67],
    [0, 0, 10, 20, 30, 40, 50, 60, 0, 0],
];

const N: MarketZone = MarketZone::Normal;
const Y: MarketZone = MarketZone::Yellow;
const O: MarketZone = MarketZone::Orange;
const B: MarketZone = MarketZone::Brown;

const STANDARD_ZONES: [[MarketZone; COLUMNS]; ROWS] = [
    [Y, N, N, N, N, N, N, N, N, N],
    [Y, Y, N, N, N, N, N, N, N, N],
    [Y, Y, Y, N, N, N, N, N, N, N],
    [O, Y, Y, Y, N, N, N, N, N, N],
    [O, O, Y, Y, N, N, N, N, N, N],
    [B, O, O, Y, Y, N, N, N, N, N],
    [B, B, O, O, Y, Y, N, N, N, N],
    [B, B, B, O, Y, Y, Y, N, N, N],
    [N, B, B, B, O, Y, Y, Y, N, N],
    [N, N, B, B, B, O, Y, Y, N, N],
];

const STANDARD_PAR_VALUES: [u32; 6] = [100, 90, 82, 76, 71, 67];

/// Structural problems in a market grid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MarketGridError {
    #[error("market grid is empty")]
    Empty,

    #[error("market row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("zone grid does not match the price grid")]
    ZoneMismatch,

    #[error("founding column {0} is outside the grid")]
    FoundingColumnOutside(u8),

    #[error("par value {0} is not in the founding column")]
    ParValueMissing(u32),
}

/// Price grid with a parallel zone grid, both indexed `[row][column]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketGrid {
    /// `None` marks an illegal square.
    pub prices: Vec<Vec<Option<u32>>>,
    pub zones: Vec<Vec<MarketZone>>,
    /// Permitted par values, highest first; each must appear in the founding column.
    pub par_values: Vec<u32>,
    #[cfg_attr(feature = "serde", serde(default = "default_founding_column"))]
    pub founding_column: u8,
}

#[cfg(feature = "serde")]
fn default_founding_column() -> u8 {
    GameConfig::FOUNDING_COLUMN
}

impl MarketGrid {
    pub fn standard() -> Self {
        let prices = STANDARD_PRICES
            .iter()
            .map(|row| {
                row.iter()
                    .map(|price| (*price > 0).then_some(*price))
                    .collect()
            })
            .collect();
        let zones = STANDARD_ZONES.iter().map(|row| row.to_vec()).collect();
        Self {
            prices,
            zones,
            par_values: STANDARD_PAR_VALUES.to_vec(),
            founding_column: GameConfig::FOUNDING_COLUMN,
        }
    }

    /// Checks that the grid is rectangular, the zone grid matches it, and
    /// every par value sits in the founding column.
    pub fn validate(&self) -> Result<(), MarketGridError> {
        let columns = self.prices.first().map(Vec::len).unwrap_or(0);
        if columns == 0 {
            return Err(MarketGridError::Empty);
        }
        if let Some((row, found)) = self
            .prices
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != columns)
        {
            return Err(MarketGridError::RaggedRow {
                row,
                found,
                expected: columns,
            });
        }
        if self.zones.len() != self.prices.len()
            || self.zones.iter().any(|row| row.len() != columns)
        {
            return Err(MarketGridError::ZoneMismatch);
        }
        if self.founding_column as usize >= columns {
            return Err(MarketGridError::FoundingColumnOutside(self.founding_column));
        }
        if let Some(par) = self.par_values.iter().find(|par| self.par_row(**par).is_none()) {
            return Err(MarketGridError::ParValueMissing(*par));
        }
        Ok(())
    }
}

impl Default for MarketGrid {
    fn default() -> Self {
        Self::standard()
    }
}

impl MarketOracle for MarketGrid {
    fn columns(&self) -> u8 {
        self.prices.first().map(Vec::len).unwrap_or(0) as u8
    }

    fn rows(&self) -> u8 {
        self.prices.len() as u8
    }

    fn cell(&self, position: GridPosition) -> Option<MarketCell> {
        let row = position.row as usize;
        let column = position.column as usize;
        let price = (*self.prices.get(row)?.get(column)?)?;
        let zone = self
            .zones
            .get(row)
            .and_then(|zones| zones.get(column))
            .copied()
            .unwrap_or_default();
        Some(MarketCell::new(price, zone))
    }

    fn par_row(&self, par_value: u32) -> Option<u8> {
        if !self.par_values.contains(&par_value) {
            return None;
        }
        let column = self.founding_column as usize;
        self.prices
            .iter()
            .position(|row| row.get(column).copied().flatten() == Some(par_value))
            .map(|row| row as u8)
    }

    fn par_values(&self) -> Vec<u32> {
        self.par_values.clone()
    }

    fn founding_column(&self) -> u8 {
        self.founding_column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_values_sit_in_rows_zero_to_five() {
        let grid = MarketGrid::standard();
        assert_eq!(grid.validate(), Ok(()));
        for (row, par) in STANDARD_PAR_VALUES.iter().enumerate() {
            assert_eq!(grid.par_row(*par), Some(row as u8));
        }
        assert_eq!(grid.par_row(65), None);
    }

    #[test]
    fn validation_names_the_broken_part() {
        let mut ragged = MarketGrid::standard();
        ragged.prices[3].pop();
        assert_eq!(
            ragged.validate(),
            Err(MarketGridError::RaggedRow {
                row: 3,
                found: 9,
                expected: 10
            })
        );

        let mut stray_par = MarketGrid::standard();
        stray_par.par_values.push(65);
        assert_eq!(stray_par.validate(), Err(MarketGridError::ParValueMissing(65)));
    }

    #[test]
    fn illegal_and_off_grid_squares_have_no_cell() {
        let grid = MarketGrid::standard();
        assert_eq!(grid.cell(GridPosition::new(0, 8)), None);
        assert_eq!(grid.cell(GridPosition::new(10, 0)), None);
        assert_eq!(
            grid.cell(GridPosition::new(6, 5)),
            Some(MarketCell::new(67, MarketZone::Normal))
        );
        assert_eq!(grid.cell(GridPosition::new(0, 5)).map(|cell| cell.zone), Some(MarketZone::Brown));
    }

    #[test]
    fn founding_column_descends() {
        let grid = MarketGrid::standard();
        let column: Vec<u32> = (0..grid.rows())
            .filter_map(|row| grid.cell(GridPosition::new(6, row)))
            .map(|cell| cell.price)
            .collect();
        assert!(column.windows(2).all(|pair| pair[0] > pair[1]));
    }
}
