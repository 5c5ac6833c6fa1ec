//! Private-company auction actions.

use crate::action::{ActionTransition, AuctionError};
use crate::engine::{auction, turns};
use crate::env::GameEnv;
use crate::state::{AuctionState, Bid, GameState, NotificationKind, PlayerId, PrivateId};

/// Shared turn checks for the regular (non bid-off) auction actions.
fn auction_turn(state: &GameState, player: PlayerId) -> Result<&AuctionState, AuctionError> {
    let current = auction::auction(state)?;
    if state.player(player).is_none() {
        return Err(AuctionError::UnknownPlayer(player));
    }
    if current.bid_off.is_some() {
        return Err(AuctionError::BidOffInProgress);
    }
    if current.current_player() != Some(player) {
        return Err(AuctionError::NotYourTurn {
            player,
            current: current.current_player(),
        });
    }
    Ok(current)
}

/// Buy the cheapest unowned private company at its current price.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BuyCheapestPrivateAction {
    pub player: PlayerId,
}

impl BuyCheapestPrivateAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for BuyCheapestPrivateAction {
    type Error = AuctionError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let current = auction_turn(state, self.player)?;
        let lot = current.cheapest().ok_or(AuctionError::NoUnownedPrivates)?;
        if current.bids_on(lot.private).next().is_some() {
            return Err(AuctionError::CheapestHasBids(lot.private));
        }
        let available = auction::available_cash(state, self.player)?;
        if available < lot.current_price {
            return Err(AuctionError::InsufficientFunds {
                needed: lot.current_price,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        auction::buy_cheapest(state, self.player)
    }
}

/// Bid on a private company other than the cheapest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidOnPrivateAction {
    pub player: PlayerId,
    pub private: PrivateId,
    pub amount: u32,
}

impl BidOnPrivateAction {
    pub fn new(player: PlayerId, private: PrivateId, amount: u32) -> Self {
        Self {
            player,
            private,
            amount,
        }
    }
}

impl ActionTransition for BidOnPrivateAction {
    type Error = AuctionError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let current = auction_turn(state, self.player)?;
        if current.lot(self.private).is_none() {
            return Err(AuctionError::UnknownPrivate(self.private));
        }
        if current.cheapest().map(|lot| lot.private) == Some(self.private) {
            return Err(AuctionError::CheapestMustBeBought(self.private));
        }

        let minimum = auction::minimum_bid(current, self.private)
            .ok_or(AuctionError::UnknownPrivate(self.private))?;
        if self.amount < minimum {
            return Err(AuctionError::BidTooLow {
                amount: self.amount,
                minimum,
            });
        }

        // The bid being replaced no longer counts against the player.
        let cash = state
            .player(self.player)
            .map(|player| player.cash)
            .unwrap_or(0);
        let replaced = current.bid_of(self.player, self.private).unwrap_or(0);
        let locked = current.locked_for(self.player).saturating_sub(replaced);
        let available = cash.saturating_sub(locked);
        if available < self.amount {
            return Err(AuctionError::InsufficientFunds {
                needed: self.amount,
                available,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let current = auction::auction_mut(state)?;
        current.place_bid(Bid {
            player: self.player,
            private: self.private,
            amount: self.amount,
        });
        current.turn_index = turns::advance(current.turn_index, current.turn_order.len());
        current.consecutive_passes = 0;
        let lot_name = current
            .lot(self.private)
            .map(|lot| lot.name.clone())
            .unwrap_or_default();

        let message = format!(
            "{} bids ${} on {}",
            state.player_name(self.player),
            self.amount,
            lot_name
        );
        state.notify(NotificationKind::Bid, message);
        Ok(())
    }
}

/// Decline to buy or bid this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassPrivateAuctionAction {
    pub player: PlayerId,
}

impl PassPrivateAuctionAction {
    pub fn new(player: PlayerId) -> Self {
        Self { player }
    }
}

impl ActionTransition for PassPrivateAuctionAction {
    type Error = AuctionError;

    fn actor(&self) -> Option<PlayerId> {
        Some(self.player)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        auction_turn(state, self.player).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let current = auction::auction_mut(state)?;
        current.turn_index = turns::advance(current.turn_index, current.turn_order.len());
        current.consecutive_passes += 1;
        let everyone_passed = current.consecutive_passes >= current.turn_order.len();

        let message = format!("{} passes", state.player_name(self.player));
        state.notify(NotificationKind::Pass, message);

        if everyone_passed {
            auction::handle_all_players_pass(state)?;
        }
        auction::check_auction_complete(state, env.catalog()?)
    }
}
