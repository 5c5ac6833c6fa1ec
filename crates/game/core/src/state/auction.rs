use std::collections::BTreeMap;

use super::{PlayerId, PrivateId};

/// A private company still up for auction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionLot {
    pub private: PrivateId,
    pub name: String,
    pub face_value: u32,
    /// Face value minus any reductions from full rounds of passes.
    pub current_price: u32,
}

/// An open bid. A player holds at most one bid per private company.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bid {
    pub player: PlayerId,
    pub private: PrivateId,
    pub amount: u32,
}

/// Tie-break sub-auction among every bidder on one private company.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BidOffState {
    pub private: PrivateId,
    /// Bidders in the order they act, starting from the regular auction seat.
    pub participants: Vec<PlayerId>,
    pub turn_index: usize,
    pub current_bid: u32,
    pub current_bidder: PlayerId,
    pub consecutive_passes: usize,
}

impl BidOffState {
    pub fn current_player(&self) -> Option<PlayerId> {
        self.participants.get(self.turn_index).copied()
    }
}

/// Private-company auction round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionState {
    /// Unowned lots in face-value order. Sold lots are removed.
    pub lots: Vec<AuctionLot>,
    pub turn_order: Vec<PlayerId>,
    pub turn_index: usize,
    pub bids: Vec<Bid>,
    /// Sum of each player's open bids.
    #[cfg_attr(feature = "serde", serde(with = "super::keyed"))]
    pub locked: BTreeMap<PlayerId, u32>,
    pub consecutive_passes: usize,
    pub bid_off: Option<BidOffState>,
    /// Set whenever a lot is sold; cleared by the deferred completion check.
    pub completion_check_pending: bool,
}

impl AuctionState {
    pub fn new(lots: Vec<AuctionLot>, turn_order: Vec<PlayerId>) -> Self {
        Self {
            lots,
            turn_order,
            turn_index: 0,
            bids: Vec::new(),
            locked: BTreeMap::new(),
            consecutive_passes: 0,
            bid_off: None,
            completion_check_pending: false,
        }
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn_order.get(self.turn_index).copied()
    }

    /// Index of the cheapest unowned lot. Equal prices resolve to the earlier
    /// lot, which is the lower face value.
    pub fn cheapest_index(&self) -> Option<usize> {
        self.lots
            .iter()
            .enumerate()
            .min_by_key(|(index, lot)| (lot.current_price, *index))
            .map(|(index, _)| index)
    }

    pub fn cheapest(&self) -> Option<&AuctionLot> {
        self.cheapest_index().map(|index| &self.lots[index])
    }

    pub fn lot(&self, private: PrivateId) -> Option<&AuctionLot> {
        self.lots.iter().find(|lot| lot.private == private)
    }

    pub fn bids_on(&self, private: PrivateId) -> impl Iterator<Item = &Bid> {
        self.bids.iter().filter(move |bid| bid.private == private)
    }

    pub fn highest_bid(&self, private: PrivateId) -> Option<u32> {
        self.bids_on(private).map(|bid| bid.amount).max()
    }

    pub fn bid_of(&self, player: PlayerId, private: PrivateId) -> Option<u32> {
        self.bids_on(private)
            .find(|bid| bid.player == player)
            .map(|bid| bid.amount)
    }

    pub fn locked_for(&self, player: PlayerId) -> u32 {
        self.locked.get(&player).copied().unwrap_or(0)
    }

    /// Places or replaces `player`'s bid on a lot and re-sums their locked money.
    pub fn place_bid(&mut self, bid: Bid) {
        match self
            .bids
            .iter_mut()
            .find(|existing| existing.player == bid.player && existing.private == bid.private)
        {
            Some(existing) => existing.amount = bid.amount,
            None => self.bids.push(bid),
        }
        self.relock(bid.player);
    }

    /// Drops every bid on `private` and releases the money they locked.
    pub fn clear_bids_on(&mut self, private: PrivateId) {
        let affected: Vec<PlayerId> = self.bids_on(private).map(|bid| bid.player).collect();
        self.bids.retain(|bid| bid.private != private);
        for player in affected {
            self.relock(player);
        }
    }

    fn relock(&mut self, player: PlayerId) {
        let total: u32 = self
            .bids
            .iter()
            .filter(|bid| bid.player == player)
            .map(|bid| bid.amount)
            .sum();
        if total == 0 {
            self.locked.remove(&player);
        } else {
            self.locked.insert(player, total);
        }
    }

    pub fn remove_lot(&mut self, private: PrivateId) -> Option<AuctionLot> {
        let index = self.lots.iter().position(|lot| lot.private == private)?;
        Some(self.lots.remove(index))
    }
}

/// Outcome of one private company once the auction has ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LotOutcome {
    Sold { buyer: PlayerId, price: u32 },
    Unsold { face_value: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SummaryEntry {
    pub private: PrivateId,
    pub name: String,
    pub outcome: LotOutcome,
}

/// Read-only report of how every private company left the auction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AuctionSummary {
    pub entries: Vec<SummaryEntry>,
}

impl AuctionSummary {
    /// Sold entries grouped by buyer.
    pub fn by_buyer(&self) -> BTreeMap<PlayerId, Vec<&SummaryEntry>> {
        let mut grouped: BTreeMap<PlayerId, Vec<&SummaryEntry>> = BTreeMap::new();
        for entry in &self.entries {
            if let LotOutcome::Sold { buyer, .. } = entry.outcome {
                grouped.entry(buyer).or_default().push(entry);
            }
        }
        grouped
    }

    pub fn unsold(&self) -> impl Iterator<Item = &SummaryEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, LotOutcome::Unsold { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(id: u8, face_value: u32) -> AuctionLot {
        AuctionLot {
            private: PrivateId(id),
            name: format!("private {id}"),
            face_value,
            current_price: face_value,
        }
    }

    #[test]
    fn cheapest_prefers_earlier_lot_on_equal_price() {
        let mut auction = AuctionState::new(
            vec![lot(0, 20), lot(1, 40), lot(2, 40)],
            vec![PlayerId(0), PlayerId(1)],
        );
        auction.lots.remove(0);
        assert_eq!(auction.cheapest().map(|lot| lot.private), Some(PrivateId(1)));

        auction.lots[1].current_price = 35;
        assert_eq!(auction.cheapest().map(|lot| lot.private), Some(PrivateId(2)));
    }

    #[test]
    fn rebid_replaces_and_relocks() {
        let mut auction = AuctionState::new(vec![lot(0, 20), lot(1, 40), lot(2, 70)], vec![]);
        let player = PlayerId(0);
        auction.place_bid(Bid { player, private: PrivateId(1), amount: 45 });
        auction.place_bid(Bid { player, private: PrivateId(2), amount: 75 });
        assert_eq!(auction.locked_for(player), 120);

        auction.place_bid(Bid { player, private: PrivateId(1), amount: 60 });
        assert_eq!(auction.bids.len(), 2);
        assert_eq!(auction.locked_for(player), 135);

        auction.clear_bids_on(PrivateId(2));
        assert_eq!(auction.locked_for(player), 60);
        auction.clear_bids_on(PrivateId(1));
        assert!(auction.locked.is_empty());
    }
}
