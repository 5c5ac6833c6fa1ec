//! Private-company auction rules.
//!
//! Every function here re-derives the cheapest unowned lot from the current
//! prices instead of caching it, since reductions can reorder the lots.

use crate::action::AuctionError;
use crate::config::GameConfig;
use crate::env::CatalogOracle;
use crate::state::{
    AuctionState, AuctionSummary, BidOffState, GameState, LotOutcome, NotificationKind,
    OwnedPrivate, PlayerId, PrivateId, RoundKind, SummaryEntry,
};

use super::turns;

pub(crate) fn auction(state: &GameState) -> Result<&AuctionState, AuctionError> {
    match (&state.round, &state.auction) {
        (RoundKind::PrivateAuction, Some(auction)) => Ok(auction),
        _ => Err(AuctionError::NotAuctionRound),
    }
}

pub(crate) fn auction_mut(state: &mut GameState) -> Result<&mut AuctionState, AuctionError> {
    match (&state.round, &mut state.auction) {
        (RoundKind::PrivateAuction, Some(auction)) => Ok(auction),
        _ => Err(AuctionError::NotAuctionRound),
    }
}

/// Cash not tied up in open bids.
pub(crate) fn available_cash(state: &GameState, player: PlayerId) -> Result<u32, AuctionError> {
    let cash = state
        .player(player)
        .ok_or(AuctionError::UnknownPlayer(player))?
        .cash;
    let locked = state
        .auction
        .as_ref()
        .map(|auction| auction.locked_for(player))
        .unwrap_or(0);
    Ok(cash.saturating_sub(locked))
}

/// Smallest legal bid on a lot: the standing high bid (or face value) plus the increment.
pub(crate) fn minimum_bid(auction: &AuctionState, private: PrivateId) -> Option<u32> {
    let lot = auction.lot(private)?;
    let base = auction.highest_bid(private).unwrap_or(lot.face_value);
    Some(base + GameConfig::BID_INCREMENT)
}

/// Moves a lot to `player` at `price`, releases every bid on it and flags the
/// deferred completion check.
pub(crate) fn award(
    state: &mut GameState,
    player: PlayerId,
    private: PrivateId,
    price: u32,
) -> Result<(), AuctionError> {
    let auction = auction_mut(state)?;
    let lot = auction
        .lot(private)
        .cloned()
        .ok_or(AuctionError::UnknownPrivate(private))?;
    let turn_order = auction.turn_order.clone();

    let buyer = state
        .player_mut(player)
        .ok_or(AuctionError::UnknownPlayer(player))?;
    buyer.cash = buyer
        .cash
        .checked_sub(price)
        .ok_or(AuctionError::InsufficientFunds {
            needed: price,
            available: buyer.cash,
        })?;
    buyer.privates.push(OwnedPrivate {
        id: lot.private,
        name: lot.name.clone(),
        face_value: lot.face_value,
        purchase_price: price,
    });
    state.bank_cash += price;

    let auction = auction_mut(state)?;
    auction.remove_lot(private);
    auction.clear_bids_on(private);
    auction.completion_check_pending = true;

    if let Some(next) = turns::next_after(&turn_order, player) {
        state.priority_deal = next;
    }
    let message = format!(
        "{} bought {} for ${}",
        state.player_name(player),
        lot.name,
        price
    );
    state.notify(NotificationKind::Purchase, message);
    Ok(())
}

/// Buys the cheapest unowned lot at its current price for `player` and
/// advances the turn.
pub(crate) fn buy_cheapest(state: &mut GameState, player: PlayerId) -> Result<(), AuctionError> {
    let auction = auction(state)?;
    let lot = auction.cheapest().ok_or(AuctionError::NoUnownedPrivates)?;
    if auction.bids_on(lot.private).next().is_some() {
        return Err(AuctionError::CheapestHasBids(lot.private));
    }
    let (private, price) = (lot.private, lot.current_price);

    let available = available_cash(state, player)?;
    if available < price {
        return Err(AuctionError::InsufficientFunds {
            needed: price,
            available,
        });
    }

    award(state, player, private, price)?;
    let auction = auction_mut(state)?;
    auction.turn_index = turns::advance(auction.turn_index, auction.turn_order.len());
    auction.consecutive_passes = 0;
    Ok(())
}

/// Runs once every seated player has passed in a row.
///
/// At or below the forced-sale threshold the next player must take the
/// cheapest lot; otherwise its price drops. A lot that already carries bids is
/// left for the completion check.
pub(crate) fn handle_all_players_pass(state: &mut GameState) -> Result<(), AuctionError> {
    let auction = auction_mut(state)?;
    auction.consecutive_passes = 0;
    let Some(index) = auction.cheapest_index() else {
        return Ok(());
    };
    let private = auction.lots[index].private;
    if auction.bids_on(private).next().is_some() {
        return Ok(());
    }

    if auction.lots[index].current_price <= GameConfig::FORCED_SALE_THRESHOLD {
        let next = auction.current_player();
        if let Some(next) = next {
            match buy_cheapest(state, next) {
                Ok(()) => return Ok(()),
                Err(AuctionError::InsufficientFunds { .. }) => {}
                Err(error) => return Err(error),
            }
        }
    }

    let auction = auction_mut(state)?;
    let lot = &mut auction.lots[index];
    lot.current_price = lot.current_price.saturating_sub(GameConfig::PRICE_REDUCTION);
    let message = format!("{} reduced to ${}", lot.name, lot.current_price);
    state.notify(NotificationKind::PriceReduced, message);
    Ok(())
}

/// Resolves the cheapest lot if its bids allow it, or ends the auction once
/// every lot is owned.
///
/// A single bidder wins outright. Two or more bidders go to a bid-off. A sale
/// made here does not re-run the check; the caller resumes it later through
/// the pending flag.
pub(crate) fn check_auction_complete<C>(state: &mut GameState, catalog: &C) -> Result<(), AuctionError>
where
    C: CatalogOracle + ?Sized,
{
    let auction = auction(state)?;
    if auction.bid_off.is_some() {
        return Ok(());
    }
    let Some(lot) = auction.cheapest() else {
        finish_auction(state, catalog);
        return Ok(());
    };

    let private = lot.private;
    let bids: Vec<_> = auction.bids_on(private).copied().collect();
    match bids.as_slice() {
        [] => Ok(()),
        [bid] => award(state, bid.player, private, bid.amount),
        _ => {
            let highest = bids.iter().map(|bid| bid.amount).max().unwrap_or(0);
            let tied: Vec<PlayerId> = bids.iter().map(|bid| bid.player).collect();
            start_bid_off(state, private, &tied, highest)
        }
    }
}

/// Opens a bid-off between every bidder on `private`.
///
/// Participants act in table order starting from the current auction seat, and
/// the standing high bidder never takes the first sub-turn.
pub(crate) fn start_bid_off(
    state: &mut GameState,
    private: PrivateId,
    tied: &[PlayerId],
    highest: u32,
) -> Result<(), AuctionError> {
    let auction = auction_mut(state)?;
    let seats = auction.turn_order.len();
    let participants: Vec<PlayerId> = (0..seats)
        .map(|offset| auction.turn_order[(auction.turn_index + offset) % seats])
        .filter(|player| tied.contains(player))
        .collect();
    let current_bidder = auction
        .bids_on(private)
        .filter(|bid| bid.amount == highest)
        .map(|bid| bid.player)
        .find(|player| participants.contains(player))
        .or_else(|| participants.first().copied())
        .ok_or(AuctionError::UnknownPrivate(private))?;

    let mut bid_off = BidOffState {
        private,
        participants,
        turn_index: 0,
        current_bid: highest,
        current_bidder,
        consecutive_passes: 0,
    };
    // The leader never opens the bid-off against their own bid; the first
    // tied player scanning forward from the leader acts instead.
    if bid_off.current_player() == Some(current_bidder) {
        bid_off.turn_index = next_bid_off_turn(&bid_off);
    }

    let names: Vec<&str> = bid_off
        .participants
        .iter()
        .map(|player| state.player_name(*player))
        .collect();
    let lot_name = auction_lot_name(state, private);
    let message = format!(
        "Bid-off for {} between {} at ${}",
        lot_name,
        names.join(", "),
        highest
    );
    auction_mut(state)?.bid_off = Some(bid_off);
    state.notify(NotificationKind::BidOff, message);
    Ok(())
}

/// Next bid-off seat that is not the standing high bidder.
pub(crate) fn next_bid_off_turn(bid_off: &BidOffState) -> usize {
    let len = bid_off.participants.len();
    let mut index = bid_off.turn_index;
    for _ in 0..len {
        index = turns::advance(index, len);
        if bid_off.participants[index] != bid_off.current_bidder {
            return index;
        }
    }
    index
}

fn auction_lot_name(state: &GameState, private: PrivateId) -> String {
    state
        .auction
        .as_ref()
        .and_then(|auction| auction.lot(private))
        .map(|lot| lot.name.clone())
        .unwrap_or_else(|| private.to_string())
}

fn finish_auction<C>(state: &mut GameState, catalog: &C)
where
    C: CatalogOracle + ?Sized,
{
    state.auction_summary = Some(build_summary(state, catalog));
    state.auction = None;
    state.round = RoundKind::AuctionSummary;
    state.notify(NotificationKind::RoundChanged, "Private auction complete");
}

/// Classifies every catalog private company as sold (with buyer and price) or
/// unsold at face value.
pub fn build_summary<C>(state: &GameState, catalog: &C) -> AuctionSummary
where
    C: CatalogOracle + ?Sized,
{
    let entries = catalog
        .private_companies()
        .iter()
        .map(|template| {
            let sold = state.players.iter().find_map(|player| {
                player
                    .privates
                    .iter()
                    .find(|owned| owned.id == template.id)
                    .map(|owned| (player.id, owned.purchase_price))
            });
            let outcome = match sold {
                Some((buyer, price)) => LotOutcome::Sold { buyer, price },
                None => LotOutcome::Unsold {
                    face_value: template.cost,
                },
            };
            SummaryEntry {
                private: template.id,
                name: template.name.clone(),
                outcome,
            }
        })
        .collect();
    AuctionSummary { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{Fixture, p};
    use crate::state::Bid;

    #[test]
    fn minimum_bid_uses_face_value_then_high_bid() {
        let state = Fixture::new().state(3);
        let auction = state.auction.as_ref().unwrap();
        assert_eq!(minimum_bid(auction, PrivateId(1)), Some(45));

        let mut auction = auction.clone();
        auction.place_bid(Bid { player: p(0), private: PrivateId(1), amount: 50 });
        assert_eq!(minimum_bid(&auction, PrivateId(1)), Some(55));
        assert_eq!(minimum_bid(&auction, PrivateId(9)), None);
    }

    #[test]
    fn award_moves_cash_and_flags_completion_check() {
        let mut state = Fixture::new().state(3);
        award(&mut state, p(1), PrivateId(2), 70).unwrap();

        assert_eq!(state.players[1].cash, 730);
        assert_eq!(state.players[1].privates[0].purchase_price, 70);
        assert_eq!(state.bank_cash, 12_000 - 2_400 + 70);
        assert_eq!(state.priority_deal, p(2));
        let auction = state.auction.as_ref().unwrap();
        assert!(auction.completion_check_pending);
        assert!(auction.lot(PrivateId(2)).is_none());
    }

    #[test]
    fn bid_off_starts_with_first_non_leading_bidder_from_current_seat() {
        let mut state = Fixture::new().state(4);
        {
            let auction = state.auction.as_mut().unwrap();
            auction.place_bid(Bid { player: p(0), private: PrivateId(1), amount: 50 });
            auction.place_bid(Bid { player: p(3), private: PrivateId(1), amount: 55 });
            auction.place_bid(Bid { player: p(2), private: PrivateId(1), amount: 60 });
            auction.turn_index = 2;
            auction.lots.remove(0);
        }

        let catalog_fixture = Fixture::new();
        let env = catalog_fixture.env();
        check_auction_complete(&mut state, env.catalog().unwrap()).unwrap();

        let bid_off = state.auction.as_ref().unwrap().bid_off.clone().unwrap();
        assert_eq!(bid_off.participants, vec![p(2), p(3), p(0)]);
        assert_eq!(bid_off.current_bid, 60);
        assert_eq!(bid_off.current_bidder, p(2));
        assert_eq!(bid_off.current_player(), Some(p(3)));
    }

    #[test]
    fn summary_lists_every_catalog_private() {
        let fixture = Fixture::new();
        let mut state = fixture.state(3);
        award(&mut state, p(0), PrivateId(0), 15).unwrap();

        let summary = build_summary(&state, fixture.env().catalog().unwrap());
        assert_eq!(summary.entries.len(), 6);
        assert_eq!(
            summary.entries[0].outcome,
            LotOutcome::Sold { buyer: p(0), price: 15 }
        );
        assert_eq!(summary.unsold().count(), 5);
        assert_eq!(summary.by_buyer()[&p(0)].len(), 1);
    }
}
