use std::collections::BTreeMap;

use super::CorporationId;

/// Grid coordinate on the stock market; row 0 is the top of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub column: u8,
    pub row: u8,
}

impl GridPosition {
    pub const fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// One row toward the top (price up) or bottom (price down), or `None` past row 0.
    pub fn step(self, direction: PriceDirection) -> Option<Self> {
        let row = match direction {
            PriceDirection::Up => self.row.checked_sub(1)?,
            PriceDirection::Down => self.row.checked_add(1)?,
        };
        Some(Self { row, ..self })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PriceDirection {
    Up,
    Down,
}

/// Token positions of founded corporations. The price grid itself is static
/// and lives behind [`crate::env::MarketOracle`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockMarket {
    #[cfg_attr(feature = "serde", serde(with = "super::keyed"))]
    pub tokens: BTreeMap<CorporationId, GridPosition>,
}

impl StockMarket {
    pub fn position(&self, corporation: CorporationId) -> Option<GridPosition> {
        self.tokens.get(&corporation).copied()
    }

    pub fn place(&mut self, corporation: CorporationId, position: GridPosition) {
        self.tokens.insert(corporation, position);
    }

    pub fn remove(&mut self, corporation: CorporationId) -> Option<GridPosition> {
        self.tokens.remove(&corporation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_stops_at_top_row() {
        let top = GridPosition::new(6, 0);
        assert_eq!(top.step(PriceDirection::Up), None);
        assert_eq!(top.step(PriceDirection::Down), Some(GridPosition::new(6, 1)));
        assert_eq!(
            GridPosition::new(3, 4).step(PriceDirection::Up),
            Some(GridPosition::new(3, 3))
        );
    }
}
