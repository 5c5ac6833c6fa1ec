//! Which actions each round offers.
//!
//! The lookup by round kind is pure and static; UI layers use it to label
//! controls and size turn timers. [`get_available_actions`] narrows it to what
//! one player can submit right now.

use crate::action::ActionKind;
use crate::state::{GameState, PlayerId, RoundKind};

const PRIVATE_AUCTION: &[ActionKind] = &[
    ActionKind::BuyCheapestPrivate,
    ActionKind::BidOnPrivate,
    ActionKind::PassPrivateAuction,
    ActionKind::BidOffBid,
    ActionKind::BidOffPass,
];

const STOCK_ROUND: &[ActionKind] = &[
    ActionKind::BuyCertificate,
    ActionKind::BuyPoolCertificate,
    ActionKind::SellCertificate,
    ActionKind::EndStockTurn,
    ActionKind::PassStockTurn,
    ActionKind::UndoStock,
];

const AUCTION_SUMMARY: &[ActionKind] = &[ActionKind::BeginStockRound];

const OPERATING_ROUND: &[ActionKind] = &[ActionKind::EndOperatingRound];

/// Every action kind a round of this type can accept.
pub fn available_actions(round: RoundKind) -> &'static [ActionKind] {
    match round {
        RoundKind::PrivateAuction => PRIVATE_AUCTION,
        RoundKind::AuctionSummary => AUCTION_SUMMARY,
        RoundKind::StockRound => STOCK_ROUND,
        RoundKind::OperatingRound => OPERATING_ROUND,
    }
}

/// Player actions `player` may submit in the current state.
///
/// Returns an empty vec when it is not the player's turn. This only narrows by
/// round and turn; funds and limits are still checked on execution.
pub fn get_available_actions(player: PlayerId, state: &GameState) -> Vec<ActionKind> {
    if state.current_player() != Some(player) {
        return Vec::new();
    }

    match state.round {
        RoundKind::PrivateAuction => {
            let in_bid_off = state
                .auction
                .as_ref()
                .is_some_and(|auction| auction.bid_off.is_some());
            if in_bid_off {
                vec![ActionKind::BidOffBid, ActionKind::BidOffPass]
            } else {
                vec![
                    ActionKind::BuyCheapestPrivate,
                    ActionKind::BidOnPrivate,
                    ActionKind::PassPrivateAuction,
                ]
            }
        }
        RoundKind::StockRound => {
            let Some(round) = state.stock_round.as_ref() else {
                return Vec::new();
            };
            let mut actions = vec![
                ActionKind::BuyCertificate,
                ActionKind::BuyPoolCertificate,
                ActionKind::SellCertificate,
            ];
            if round.acted_this_turn() {
                actions.extend([ActionKind::EndStockTurn, ActionKind::UndoStock]);
            } else {
                actions.push(ActionKind::PassStockTurn);
            }
            actions
        }
        RoundKind::AuctionSummary | RoundKind::OperatingRound => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{fixture_state, p};

    #[test]
    fn lookup_covers_every_round() {
        assert_eq!(available_actions(RoundKind::PrivateAuction).len(), 5);
        assert_eq!(available_actions(RoundKind::StockRound).len(), 6);
        assert_eq!(
            available_actions(RoundKind::OperatingRound),
            &[ActionKind::EndOperatingRound]
        );
        assert!(
            available_actions(RoundKind::AuctionSummary).contains(&ActionKind::BeginStockRound)
        );
    }

    #[test]
    fn only_the_current_player_gets_actions() {
        let state = fixture_state(3);
        assert_eq!(get_available_actions(p(0), &state).len(), 3);
        assert!(get_available_actions(p(1), &state).is_empty());
    }
}
