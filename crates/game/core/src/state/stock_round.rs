use super::{Corporation, CorporationId, Millis, Player, PlayerId, StockMarket};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StockActionKind {
    StartCorporation,
    BuyCertificate,
    BuyPoolCertificate,
    SellCertificate,
    Pass,
}

/// One entry in the stock-round history.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockActionRecord {
    pub player: PlayerId,
    pub kind: StockActionKind,
    pub corporation: Option<CorporationId>,
    /// Share units moved (10% each); 0 for passes.
    pub shares: u32,
    /// Per-share price the action settled at.
    pub price: u32,
    pub at: Millis,
}

/// Ledger contents captured before a stock action so it can be undone verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerSnapshot {
    pub players: Vec<Player>,
    pub corporations: Vec<Corporation>,
    pub market: StockMarket,
    pub bank_cash: u32,
    pub pending_drops: Vec<CorporationId>,
    pub purchased_this_turn: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UndoEntry {
    pub record: StockActionRecord,
    pub snapshot: LedgerSnapshot,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StockRoundState {
    pub number: u32,
    pub turn_order: Vec<PlayerId>,
    pub turn_index: usize,
    /// Undo stack for the current player; cleared when the turn passes.
    pub turn_actions: Vec<UndoEntry>,
    /// Every action this round, kept across turns.
    pub round_actions: Vec<StockActionRecord>,
    /// One entry per share unit sold and not yet reflected in the price.
    pub pending_drops: Vec<CorporationId>,
    pub purchased_this_turn: bool,
    pub consecutive_passes: usize,
    pub turn_started_at: Millis,
}

impl StockRoundState {
    pub fn new(number: u32, turn_order: Vec<PlayerId>, turn_index: usize, now: Millis) -> Self {
        Self {
            number,
            turn_order,
            turn_index,
            turn_actions: Vec::new(),
            round_actions: Vec::new(),
            pending_drops: Vec::new(),
            purchased_this_turn: false,
            consecutive_passes: 0,
            turn_started_at: now,
        }
    }

    pub fn current_player(&self) -> Option<PlayerId> {
        self.turn_order.get(self.turn_index).copied()
    }

    /// Whether `player` sold `corporation` earlier in this round.
    pub fn sold_this_round(&self, player: PlayerId, corporation: CorporationId) -> bool {
        self.round_actions.iter().any(|record| {
            record.player == player
                && record.kind == StockActionKind::SellCertificate
                && record.corporation == Some(corporation)
        })
    }

    pub fn acted_this_turn(&self) -> bool {
        !self.turn_actions.is_empty()
    }
}

/// Operating-round bookkeeping. Track, route and train rules are not
/// modelled; the round only counts itself off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OperatingRoundState {
    /// 1-based index within the current set.
    pub number: u8,
    pub of: u8,
}
