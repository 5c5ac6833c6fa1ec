//! Authoritative game state representation.
//!
//! This module owns the ledger aggregate: players, corporations and their
//! certificates, market token positions, the round sub-states and the
//! notification queue. Runtime layers clone or query this state but mutate it
//! exclusively through the engine.
mod auction;
mod certificate;
mod corporation;
mod error;
mod ids;
pub mod invariants;
#[cfg(feature = "serde")]
pub mod keyed;
mod market;
mod notification;
mod player;
mod round;
mod stock_round;

pub use auction::{AuctionLot, AuctionState, AuctionSummary, Bid, BidOffState, LotOutcome, SummaryEntry};
pub use certificate::{Certificate, total_percent};
pub use corporation::Corporation;
pub use error::{InitializationError, InvariantError};
pub use ids::{CorporationId, Millis, NotificationId, PlayerId, PrivateId};
pub use market::{GridPosition, PriceDirection, StockMarket};
pub use notification::{Notification, NotificationKind, NotificationQueue};
pub use player::{OwnedPrivate, Player};
pub use round::RoundKind;
pub use stock_round::{
    LedgerSnapshot, OperatingRoundState, StockActionKind, StockActionRecord, StockRoundState,
    UndoEntry,
};

use crate::config::GameConfig;
use crate::env::{GameEnv, OracleError};

/// Canonical snapshot of the game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Caller-supplied time used to stamp notifications and records.
    pub clock: Millis,
    pub players: Vec<Player>,
    pub corporations: Vec<Corporation>,
    pub market: StockMarket,
    pub bank_cash: u32,
    /// Bank plus all players at game start; constant for the whole game.
    pub total_cash: u32,
    pub certificate_limit: usize,
    pub round: RoundKind,
    pub auction: Option<AuctionState>,
    pub auction_summary: Option<AuctionSummary>,
    pub stock_round: Option<StockRoundState>,
    /// Stock rounds opened so far.
    pub stock_round_number: u32,
    pub operating_round: Option<OperatingRoundState>,
    /// Name of the current phase from the phase table.
    pub phase: String,
    /// Player who opens the next stock round.
    pub priority_deal: PlayerId,
    pub notifications: NotificationQueue,
    /// Incremented after every successfully executed action.
    pub action_nonce: u64,
}

impl GameState {
    /// Seats a new game: starting cash from the catalog, every corporation
    /// unfounded with a full IPO pool, and every private company up for
    /// auction at face value.
    pub fn new_game<S: AsRef<str>>(
        names: &[S],
        env: &GameEnv<'_>,
        config: &GameConfig,
    ) -> Result<Self, InitializationError> {
        let count = names.len();
        if !(GameConfig::MIN_PLAYERS..=GameConfig::MAX_PLAYERS).contains(&count) {
            return Err(InitializationError::PlayerCount {
                count,
                min: GameConfig::MIN_PLAYERS,
                max: GameConfig::MAX_PLAYERS,
            });
        }
        for (seat, name) in names.iter().enumerate() {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(InitializationError::EmptyName { seat });
            }
            if names[..seat].iter().any(|other| other.as_ref().trim() == name) {
                return Err(InitializationError::DuplicateName(name.to_string()));
            }
        }

        let catalog = env.catalog()?;
        let phases = env.phases()?;
        let certificate_limit = catalog
            .certificate_limit(count)
            .ok_or(OracleError::UnsupportedPlayerCount(count))?;
        let starting_cash = catalog
            .starting_cash(count)
            .ok_or(OracleError::UnsupportedPlayerCount(count))?;
        let phase = phases.first().ok_or(OracleError::NoPhases)?.name.clone();

        let total_cash = catalog.bank_total();
        let required = u32::try_from(count)
            .ok()
            .and_then(|players| starting_cash.checked_mul(players))
            .ok_or(InitializationError::StartingCashOverflow {
                players: count,
                starting_cash,
            })?;
        let bank_cash = total_cash
            .checked_sub(required)
            .ok_or(InitializationError::BankTooSmall {
                bank_total: total_cash,
                required,
            })?;

        let players: Vec<Player> = names
            .iter()
            .enumerate()
            .map(|(seat, name)| Player::new(PlayerId(seat as u8), name.as_ref().trim(), starting_cash))
            .collect();
        let corporations = catalog
            .corporations()
            .iter()
            .map(Corporation::from_template)
            .collect();

        let mut lots: Vec<AuctionLot> = catalog
            .private_companies()
            .iter()
            .map(|template| AuctionLot {
                private: template.id,
                name: template.name.clone(),
                face_value: template.cost,
                current_price: template.cost,
            })
            .collect();
        lots.sort_by_key(|lot| lot.face_value);
        let turn_order = players.iter().map(|player| player.id).collect();

        Ok(Self {
            clock: 0,
            players,
            corporations,
            market: StockMarket::default(),
            bank_cash,
            total_cash,
            certificate_limit,
            round: RoundKind::PrivateAuction,
            auction: Some(AuctionState::new(lots, turn_order)),
            auction_summary: None,
            stock_round: None,
            stock_round_number: 0,
            operating_round: None,
            phase,
            priority_deal: PlayerId(0),
            notifications: NotificationQueue::new(config.notification_stagger_ms),
            action_nonce: 0,
        })
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn corporation(&self, id: CorporationId) -> Option<&Corporation> {
        self.corporations.iter().find(|corporation| corporation.id == id)
    }

    pub fn corporation_mut(&mut self, id: CorporationId) -> Option<&mut Corporation> {
        self.corporations
            .iter_mut()
            .find(|corporation| corporation.id == id)
    }

    /// Looks a corporation up by abbreviation, ignoring case.
    pub fn corporation_by_abbreviation(&self, abbreviation: &str) -> Option<&Corporation> {
        self.corporations
            .iter()
            .find(|corporation| corporation.abbreviation.eq_ignore_ascii_case(abbreviation))
    }

    pub fn player_name(&self, id: PlayerId) -> &str {
        self.player(id).map(|player| player.name.as_str()).unwrap_or("?")
    }

    /// Whoever may act right now, across all round kinds.
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.round {
            RoundKind::PrivateAuction => self.auction.as_ref().and_then(|auction| {
                match &auction.bid_off {
                    Some(bid_off) => bid_off.current_player(),
                    None => auction.current_player(),
                }
            }),
            RoundKind::StockRound => self.stock_round.as_ref().and_then(StockRoundState::current_player),
            RoundKind::AuctionSummary | RoundKind::OperatingRound => None,
        }
    }

    pub fn completion_check_pending(&self) -> bool {
        self.auction
            .as_ref()
            .is_some_and(|auction| auction.completion_check_pending)
    }

    pub(crate) fn snapshot_ledger(&self) -> LedgerSnapshot {
        let (pending_drops, purchased_this_turn) = self
            .stock_round
            .as_ref()
            .map(|round| (round.pending_drops.clone(), round.purchased_this_turn))
            .unwrap_or_default();
        LedgerSnapshot {
            players: self.players.clone(),
            corporations: self.corporations.clone(),
            market: self.market.clone(),
            bank_cash: self.bank_cash,
            pending_drops,
            purchased_this_turn,
        }
    }

    pub(crate) fn restore_ledger(&mut self, snapshot: LedgerSnapshot) {
        self.players = snapshot.players;
        self.corporations = snapshot.corporations;
        self.market = snapshot.market;
        self.bank_cash = snapshot.bank_cash;
        if let Some(round) = self.stock_round.as_mut() {
            round.pending_drops = snapshot.pending_drops;
            round.purchased_this_turn = snapshot.purchased_this_turn;
        }
    }

    pub(crate) fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) {
        let now = self.clock;
        self.notifications.push(kind, message, now);
    }
}
