//! System actions that move the game between rounds.
//!
//! These have no acting player. The runtime schedules them: the auction
//! completion re-check after a sale, and the hand-offs out of the auction
//! summary and the operating round.

use crate::action::{ActionTransition, RoundError};
use crate::engine::{auction, rounds};
use crate::env::GameEnv;
use crate::state::{GameState, PlayerId, RoundKind};

/// Re-runs the auction completion check that a sale deferred.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResumeAuctionAction;

impl ActionTransition for ResumeAuctionAction {
    type Error = RoundError;

    fn actor(&self) -> Option<PlayerId> {
        None
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.round != RoundKind::PrivateAuction || state.auction.is_none() {
            return Err(RoundError::NoAuction);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        auction::auction_mut(state)?.completion_check_pending = false;
        auction::check_auction_complete(state, env.catalog()?)?;
        Ok(())
    }
}

/// Leaves the auction summary or the operating rounds for a stock round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeginStockRoundAction;

impl ActionTransition for BeginStockRoundAction {
    type Error = RoundError;

    fn actor(&self) -> Option<PlayerId> {
        None
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        match state.round {
            RoundKind::AuctionSummary | RoundKind::OperatingRound => Ok(()),
            from => Err(RoundError::InvalidTransition {
                from,
                to: RoundKind::StockRound,
            }),
        }
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        rounds::begin_stock_round(state);
        Ok(())
    }
}

/// Closes the current operating round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndOperatingRoundAction;

impl ActionTransition for EndOperatingRoundAction {
    type Error = RoundError;

    fn actor(&self) -> Option<PlayerId> {
        None
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.round != RoundKind::OperatingRound {
            return Err(RoundError::InvalidTransition {
                from: state.round,
                to: RoundKind::StockRound,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        rounds::end_operating_round(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::Fixture;
    use crate::state::OperatingRoundState;

    #[test]
    fn stock_round_cannot_start_mid_auction() {
        let fixture = Fixture::new();
        let state = fixture.state(4);
        assert_eq!(
            BeginStockRoundAction.pre_validate(&state, &fixture.env()),
            Err(RoundError::InvalidTransition {
                from: RoundKind::PrivateAuction,
                to: RoundKind::StockRound,
            })
        );
    }

    #[test]
    fn operating_rounds_count_off_then_return_to_stock() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = fixture.state(4);
        state.auction = None;
        state.round = RoundKind::OperatingRound;
        state.operating_round = Some(OperatingRoundState { number: 1, of: 2 });

        EndOperatingRoundAction.apply(&mut state, &env).unwrap();
        assert_eq!(state.round, RoundKind::OperatingRound);
        assert_eq!(state.operating_round, Some(OperatingRoundState { number: 2, of: 2 }));

        EndOperatingRoundAction.apply(&mut state, &env).unwrap();
        assert_eq!(state.round, RoundKind::StockRound);
        assert_eq!(state.stock_round_number, 1);
        assert!(state.operating_round.is_none());
    }

    #[test]
    fn resume_requires_a_running_auction() {
        let fixture = Fixture::new();
        let mut state = fixture.state(3);
        state.auction = None;
        state.round = RoundKind::AuctionSummary;
        assert_eq!(
            ResumeAuctionAction.pre_validate(&state, &fixture.env()),
            Err(RoundError::NoAuction)
        );
    }
}
