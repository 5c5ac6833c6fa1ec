//! Round transitions: stock-round turns, the stock-round close, and the
//! operating-round stub.

use crate::env::{MarketOracle, PhaseOracle};
use crate::state::{
    GameState, NotificationKind, OperatingRoundState, PriceDirection, RoundKind, StockRoundState,
};

use super::market::{self, PriceMoveError};
use super::turns;

/// Opens a stock round with the priority-deal holder acting first.
pub(crate) fn begin_stock_round(state: &mut GameState) {
    let number = state.stock_round_number + 1;
    let turn_order: Vec<_> = state.players.iter().map(|player| player.id).collect();
    let turn_index = turn_order
        .iter()
        .position(|id| *id == state.priority_deal)
        .unwrap_or(0);

    state.stock_round_number = number;
    state.stock_round = Some(StockRoundState::new(
        number,
        turn_order,
        turn_index,
        state.clock,
    ));
    state.operating_round = None;
    state.round = RoundKind::StockRound;

    let message = format!(
        "Stock round {} begins with {}",
        number,
        state.player_name(state.priority_deal)
    );
    state.notify(NotificationKind::RoundChanged, message);
}

/// Flushes the departing player's price drops and hands the turn on.
pub(crate) fn end_stock_turn<M>(state: &mut GameState, market: &M) -> Result<(), PriceMoveError>
where
    M: MarketOracle + ?Sized,
{
    market::process_pending(state, market)?;
    let now = state.clock;
    if let Some(round) = state.stock_round.as_mut() {
        round.turn_index = turns::advance(round.turn_index, round.turn_order.len());
        round.turn_actions.clear();
        round.purchased_this_turn = false;
        round.turn_started_at = now;
    }
    Ok(())
}

/// Closes the stock round after everyone passed in succession: pending drops
/// apply, sold-out corporations rise one row, and operating rounds begin.
pub(crate) fn finish_stock_round<M, P>(
    state: &mut GameState,
    market: &M,
    phases: &P,
) -> Result<(), PriceMoveError>
where
    M: MarketOracle + ?Sized,
    P: PhaseOracle + ?Sized,
{
    market::process_pending(state, market)?;

    let sold_out: Vec<_> = state
        .corporations
        .iter()
        .filter(|corporation| corporation.is_sold_out())
        .map(|corporation| corporation.id)
        .collect();
    for corporation in sold_out {
        match market::move_stock_price(state, market, corporation, PriceDirection::Up) {
            Ok(price) => {
                let name = state
                    .corporation(corporation)
                    .map(|record| record.display_name().to_string())
                    .unwrap_or_default();
                state.notify(
                    NotificationKind::RoundChanged,
                    format!("{name} is sold out and rises to ${price}"),
                );
            }
            Err(error) if error.is_edge() => {}
            Err(error) => return Err(error),
        }
    }

    let of = operating_rounds(state, phases);
    state.stock_round = None;
    state.round = RoundKind::OperatingRound;
    state.operating_round = Some(OperatingRoundState { number: 1, of });
    state.notify(NotificationKind::RoundChanged, "Operating round 1 begins");
    Ok(())
}

/// Advances to the next operating round of the set, or back to a stock round.
pub(crate) fn end_operating_round(state: &mut GameState) {
    match state.operating_round {
        Some(OperatingRoundState { number, of }) if number < of => {
            state.operating_round = Some(OperatingRoundState {
                number: number + 1,
                of,
            });
            let message = format!("Operating round {} begins", number + 1);
            state.notify(NotificationKind::RoundChanged, message);
        }
        _ => begin_stock_round(state),
    }
}

fn operating_rounds<P>(state: &GameState, phases: &P) -> u8
where
    P: PhaseOracle + ?Sized,
{
    phases
        .phase(&state.phase)
        .map(|phase| phase.operating_rounds)
        .unwrap_or(1)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{Fixture, p};

    #[test]
    fn stock_round_starts_at_priority_holder() {
        let mut state = Fixture::new().state(4);
        state.round = RoundKind::AuctionSummary;
        state.auction = None;
        state.priority_deal = p(2);

        begin_stock_round(&mut state);

        let round = state.stock_round.as_ref().unwrap();
        assert_eq!(round.number, 1);
        assert_eq!(round.current_player(), Some(p(2)));
        assert_eq!(state.round, RoundKind::StockRound);
    }

    #[test]
    fn operating_rounds_follow_the_phase_table() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = fixture.state(3);
        state.auction = None;
        state.phase = "3".to_string();
        begin_stock_round(&mut state);

        finish_stock_round(&mut state, env.market().unwrap(), env.phases().unwrap()).unwrap();
        assert_eq!(state.operating_round, Some(OperatingRoundState { number: 1, of: 2 }));

        end_operating_round(&mut state);
        assert_eq!(state.round, RoundKind::OperatingRound);
        end_operating_round(&mut state);
        assert_eq!(state.round, RoundKind::StockRound);
        assert_eq!(state.stock_round.as_ref().unwrap().number, 2);
    }
}
