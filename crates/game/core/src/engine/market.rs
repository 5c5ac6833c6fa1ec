//! Stock market position resolver and price movement.

use crate::env::{MarketOracle, OracleError};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CorporationId, GameState, GridPosition, NotificationKind, PriceDirection};

/// Why a token could not move.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceMoveError {
    #[error("{0} has no market token")]
    NoToken(CorporationId),

    #[error("unknown corporation {0}")]
    UnknownCorporation(CorporationId),

    #[error("{corporation} cannot move {direction} from {from:?}: edge of the market")]
    OutOfBounds {
        corporation: CorporationId,
        from: GridPosition,
        direction: PriceDirection,
    },

    #[error("{corporation} cannot move to illegal square {to:?}")]
    IllegalCell {
        corporation: CorporationId,
        to: GridPosition,
    },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl PriceMoveError {
    /// Hitting the floor or ceiling of a column is part of normal play.
    pub fn is_edge(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::IllegalCell { .. })
    }
}

impl GameError for PriceMoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            _ if self.is_edge() => ErrorSeverity::Validation,
            _ => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoToken(_) => "MARKET_NO_TOKEN",
            Self::UnknownCorporation(_) => "MARKET_UNKNOWN_CORPORATION",
            Self::OutOfBounds { .. } => "MARKET_OUT_OF_BOUNDS",
            Self::IllegalCell { .. } => "MARKET_ILLEGAL_CELL",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// Founding square for a par value, if the value is permitted.
pub fn par_position<M>(market: &M, par_value: u32) -> Option<GridPosition>
where
    M: MarketOracle + ?Sized,
{
    let row = market.par_row(par_value)?;
    let position = GridPosition::new(market.founding_column(), row);
    market.cell(position).map(|_| position)
}

pub fn price_at<M>(market: &M, position: GridPosition) -> Option<u32>
where
    M: MarketOracle + ?Sized,
{
    market.cell(position).map(|cell| cell.price)
}

/// Moves a token one row and re-reads the price. No mutation on failure.
pub fn move_stock_price<M>(
    state: &mut GameState,
    market: &M,
    corporation: CorporationId,
    direction: PriceDirection,
) -> Result<u32, PriceMoveError>
where
    M: MarketOracle + ?Sized,
{
    let from = state
        .market
        .position(corporation)
        .ok_or(PriceMoveError::NoToken(corporation))?;
    let to = from
        .step(direction)
        .filter(|position| market.contains(*position))
        .ok_or(PriceMoveError::OutOfBounds {
            corporation,
            from,
            direction,
        })?;
    let cell = market
        .cell(to)
        .ok_or(PriceMoveError::IllegalCell { corporation, to })?;

    let record = state
        .corporation_mut(corporation)
        .ok_or(PriceMoveError::UnknownCorporation(corporation))?;
    record.share_price = cell.price;
    state.market.place(corporation, to);
    Ok(cell.price)
}

/// Applies deferred down-moves from sales. A token already on the floor stays put.
pub(crate) fn process_pending<M>(state: &mut GameState, market: &M) -> Result<(), PriceMoveError>
where
    M: MarketOracle + ?Sized,
{
    let pending = match state.stock_round.as_mut() {
        Some(round) => std::mem::take(&mut round.pending_drops),
        None => return Ok(()),
    };

    let mut moved: Vec<CorporationId> = Vec::new();
    for corporation in pending {
        match move_stock_price(state, market, corporation, PriceDirection::Down) {
            Ok(_) => {
                if !moved.contains(&corporation) {
                    moved.push(corporation);
                }
            }
            Err(error) if error.is_edge() => {}
            Err(error) => return Err(error),
        }
    }

    for corporation in moved {
        if let Some(record) = state.corporation(corporation) {
            let message = format!(
                "{} share price drops to ${}",
                record.display_name(),
                record.share_price
            );
            state.notify(NotificationKind::PriceReduced, message);
        }
    }
    Ok(())
}
