//! Stock-round turn control: ending a turn, passing, and undoing within a turn.

use crate::action::{ActionTransition, TurnError};
use crate::engine::{rounds, turns};
use crate::env::GameEnv;
use crate::state::{
    GameState, NotificationKind, PlayerId, RoundKind, StockActionKind, StockActionRecord,
    StockRoundState,
};

fn turn_of(state: &GameState, player: PlayerId) -> Result<&StockRoundState, TurnError> {
    let round = match (&state.round, &state.stock_round) {
        (RoundKind::StockRound, Some(round)) => round,
        _ => return Err(TurnError::NotStockRound),
    };
    if state.player(player).is_none() {
        return Err(TurnError::UnknownPlayer(player));
    }
    if round.current_player() != Some(player) {
        return Err(TurnError::NotYourTurn {
            player,
            current: round.current_player(),
        });
    }
    Ok(round)
}

/// Finish a turn in which the player bought or sold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndStockTurnAction {
    pub player: PlayerId,
}

impl EndStockTurnAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for EndStockTurnAction {
    type Error = TurnError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let round = turn_of(state, self.player)?;
        if !round.acted_this_turn() {
            return Err(TurnError::NoActionTaken);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let seats: Vec<PlayerId> = state.players.iter().map(|player| player.id).collect();
        state.priority_deal = turns::next_after(&seats, self.player).unwrap_or(self.player);
        if let Some(round) = state.stock_round.as_mut() {
            round.consecutive_passes = 0;
        }
        rounds::end_stock_turn(state, env.market()?)?;
        Ok(())
    }
}

/// Pass without acting. A full circle of passes closes the stock round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassStockTurnAction {
    pub player: PlayerId,
}

impl PassStockTurnAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for PassStockTurnAction {
    type Error = TurnError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let round = turn_of(state, self.player)?;
        if round.acted_this_turn() {
            return Err(TurnError::AlreadyActed);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let now = state.clock;
        let players = state.players.len();
        let round = state.stock_round.as_mut().ok_or(TurnError::NotStockRound)?;
        round.round_actions.push(StockActionRecord {
            player: self.player,
            kind: StockActionKind::Pass,
            corporation: None,
            shares: 0,
            price: 0,
            at: now,
        });
        round.consecutive_passes += 1;
        let closes_round = round.consecutive_passes >= players;

        let message = format!("{} passes", state.player_name(self.player));
        state.notify(NotificationKind::Pass, message);

        if closes_round {
            rounds::finish_stock_round(state, env.market()?, env.phases()?)?;
        } else {
            rounds::end_stock_turn(state, env.market()?)?;
        }
        Ok(())
    }
}

/// Revert the most recent buy or sell of the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndoStockAction {
    pub player: PlayerId,
}

impl UndoStockAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for UndoStockAction {
    type Error = TurnError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let round = turn_of(state, self.player)?;
        if round.turn_actions.is_empty() {
            return Err(TurnError::NothingToUndo);
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let round = state.stock_round.as_mut().ok_or(TurnError::NotStockRound)?;
        let entry = round.turn_actions.pop().ok_or(TurnError::NothingToUndo)?;
        if let Some(index) = round
            .round_actions
            .iter()
            .rposition(|record| *record == entry.record)
        {
            round.round_actions.remove(index);
        }

        state.restore_ledger(entry.snapshot);
        if entry.record.kind == StockActionKind::StartCorporation
            && let Some(corporation) = entry
                .record
                .corporation
                .and_then(|id| state.corporation_mut(id))
        {
            corporation.reset();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::BuyCertificateAction;
    use crate::engine::test_support::{Fixture, p};
    use crate::state::CorporationId;

    const NYC: CorporationId = CorporationId(1);

    fn stock_state(fixture: &Fixture) -> GameState {
        let mut state = fixture.state(3);
        state.auction = None;
        state.round = RoundKind::AuctionSummary;
        rounds::begin_stock_round(&mut state);
        state
    }

    fn run<T: ActionTransition>(action: T, state: &mut GameState, fixture: &Fixture) -> Result<(), T::Error> {
        let env = fixture.env();
        action.pre_validate(state, &env)?;
        action.apply(state, &env)?;
        action.post_validate(state, &env)
    }

    #[test]
    fn end_turn_requires_an_action() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        assert_eq!(
            run(EndStockTurnAction::new(p(0)), &mut state, &fixture),
            Err(TurnError::NoActionTaken)
        );
    }

    #[test]
    fn end_turn_moves_priority_to_the_next_seat() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        run(BuyCertificateAction::new(p(0), NYC, Some(100)), &mut state, &fixture).unwrap();
        run(EndStockTurnAction::new(p(0)), &mut state, &fixture).unwrap();

        assert_eq!(state.priority_deal, p(1));
        assert_eq!(state.current_player(), Some(p(1)));
        assert!(state.stock_round.as_ref().unwrap().turn_actions.is_empty());
    }

    #[test]
    fn pass_after_acting_is_rejected() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        run(BuyCertificateAction::new(p(0), NYC, Some(100)), &mut state, &fixture).unwrap();
        assert_eq!(
            run(PassStockTurnAction::new(p(0)), &mut state, &fixture),
            Err(TurnError::AlreadyActed)
        );
    }

    #[test]
    fn full_circle_of_passes_opens_the_operating_round() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        for seat in 0..3 {
            run(PassStockTurnAction::new(p(seat)), &mut state, &fixture).unwrap();
        }
        assert_eq!(state.round, RoundKind::OperatingRound);
        assert!(state.stock_round.is_none());
        assert_eq!(state.operating_round.map(|round| round.of), Some(1));
    }

    #[test]
    fn undo_founding_restores_cash_and_corporation() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        let before = state.clone();
        run(BuyCertificateAction::new(p(0), NYC, Some(90)), &mut state, &fixture).unwrap();
        run(UndoStockAction::new(p(0)), &mut state, &fixture).unwrap();

        assert_eq!(state.players, before.players);
        assert_eq!(state.corporations, before.corporations);
        assert_eq!(state.bank_cash, before.bank_cash);
        assert_eq!(state.market.position(NYC), None);
        let round = state.stock_round.as_ref().unwrap();
        assert!(round.round_actions.is_empty());
        assert!(!round.purchased_this_turn);

        // The undone purchase frees the turn's single buy.
        run(BuyCertificateAction::new(p(0), NYC, Some(100)), &mut state, &fixture).unwrap();
    }

    #[test]
    fn undo_with_empty_history_is_rejected() {
        let fixture = Fixture::new();
        let mut state = stock_state(&fixture);
        assert_eq!(
            run(UndoStockAction::new(p(0)), &mut state, &fixture),
            Err(TurnError::NothingToUndo)
        );
    }
}
