//! Bid-off actions: the tie-break sub-auction between every bidder on the
//! cheapest private company.

use crate::action::{ActionTransition, BidOffError};
use crate::engine::auction;
use crate::env::GameEnv;
use crate::state::{BidOffState, GameState, NotificationKind, PlayerId};

fn bid_off_turn(state: &GameState, player: PlayerId) -> Result<&BidOffState, BidOffError> {
    let current = auction::auction(state)?;
    let bid_off = current.bid_off.as_ref().ok_or(BidOffError::NoBidOff)?;
    if state.player(player).is_none() {
        return Err(BidOffError::UnknownPlayer(player));
    }
    if bid_off.current_player() != Some(player) {
        return Err(BidOffError::NotYourTurn {
            player,
            current: bid_off.current_player(),
        });
    }
    Ok(bid_off)
}

fn bid_off_mut(state: &mut GameState) -> Result<&mut BidOffState, BidOffError> {
    auction::auction_mut(state)?
        .bid_off
        .as_mut()
        .ok_or(BidOffError::NoBidOff)
}

/// Raise the standing bid in a bid-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidOffBidAction {
    pub player: PlayerId,
    pub amount: u32,
}

impl BidOffBidAction {
    pub fn new(player: PlayerId, amount: u32) -> Self {
        Self { player, amount }
    }
}

impl ActionTransition for BidOffBidAction {
    type Error = BidOffError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let bid_off = bid_off_turn(state, self.player)?;
        if self.amount <= bid_off.current_bid {
            return Err(BidOffError::BidTooLow {
                amount: self.amount,
                current: bid_off.current_bid,
            });
        }

        // The player's own bid on the contested lot is what they are raising.
        let current = auction::auction(state)?;
        let own = current.bid_of(self.player, bid_off.private).unwrap_or(0);
        let locked = current.locked_for(self.player).saturating_sub(own);
        let cash = state
            .player(self.player)
            .map(|player| player.cash)
            .unwrap_or(0);
        let available = cash.saturating_sub(locked);
        if available < self.amount {
            return Err(BidOffError::InsufficientFunds {
                needed: self.amount,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let bid_off = bid_off_mut(state)?;
        bid_off.current_bid = self.amount;
        bid_off.current_bidder = self.player;
        bid_off.consecutive_passes = 0;
        bid_off.turn_index = auction::next_bid_off_turn(bid_off);

        let message = format!(
            "{} raises the bid-off to ${}",
            state.player_name(self.player),
            self.amount
        );
        state.notify(NotificationKind::BidOff, message);
        Ok(())
    }
}

/// Drop out of the current bid-off round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidOffPassAction {
    pub player: PlayerId,
}

impl BidOffPassAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for BidOffPassAction {
    type Error = BidOffError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        bid_off_turn(state, self.player).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let bid_off = bid_off_mut(state)?;
        bid_off.consecutive_passes += 1;
        let settled = bid_off.consecutive_passes + 1 >= bid_off.participants.len();
        if !settled {
            bid_off.turn_index = auction::next_bid_off_turn(bid_off);
            let message = format!("{} passes in the bid-off", state.player_name(self.player));
            state.notify(NotificationKind::Pass, message);
            return Ok(());
        }

        let (winner, private, price) = (bid_off.current_bidder, bid_off.private, bid_off.current_bid);
        auction::auction_mut(state)?.bid_off = None;
        auction::award(state, winner, private, price)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{Fixture, p};
    use crate::state::{Bid, PrivateId};

    fn contested_state(fixture: &Fixture) -> GameState {
        let mut state = fixture.state(3);
        let auction = state.auction.as_mut().unwrap();
        auction.place_bid(Bid { player: p(0), private: PrivateId(1), amount: 50 });
        auction.place_bid(Bid { player: p(1), private: PrivateId(1), amount: 55 });
        auction.place_bid(Bid { player: p(2), private: PrivateId(1), amount: 60 });
        auction.lots.remove(0);
        auction::check_auction_complete(&mut state, fixture.env().catalog().unwrap()).unwrap();
        state
    }

    #[test]
    fn bid_must_exceed_current_bid() {
        let fixture = Fixture::new();
        let state = contested_state(&fixture);
        let bid_off = state.auction.as_ref().unwrap().bid_off.as_ref().unwrap();
        assert_eq!(bid_off.current_bidder, p(2));
        assert_eq!(bid_off.current_player(), Some(p(0)));

        let low = BidOffBidAction::new(p(0), 60);
        assert_eq!(
            low.pre_validate(&state, &fixture.env()),
            Err(BidOffError::BidTooLow { amount: 60, current: 60 })
        );
        assert_eq!(BidOffBidAction::new(p(0), 61).pre_validate(&state, &fixture.env()), Ok(()));
    }

    #[test]
    fn rotation_skips_the_high_bidder_and_settles_after_all_others_pass() {
        let fixture = Fixture::new();
        let env = fixture.env();
        let mut state = contested_state(&fixture);

        BidOffBidAction::new(p(0), 70).apply(&mut state, &env).unwrap();
        let bid_off = state.auction.as_ref().unwrap().bid_off.clone().unwrap();
        assert_eq!(bid_off.current_player(), Some(p(1)));

        BidOffPassAction::new(p(1)).apply(&mut state, &env).unwrap();
        let bid_off = state.auction.as_ref().unwrap().bid_off.clone().unwrap();
        assert_eq!(bid_off.current_player(), Some(p(2)));

        BidOffPassAction::new(p(2)).apply(&mut state, &env).unwrap();
        let auction = state.auction.as_ref().unwrap();
        assert!(auction.bid_off.is_none());
        assert!(auction.bids.is_empty());
        assert!(auction.locked.is_empty());
        assert_eq!(state.players[0].cash, 800 - 70);
        assert!(state.players[0].owns_private(PrivateId(1)));
    }
}
