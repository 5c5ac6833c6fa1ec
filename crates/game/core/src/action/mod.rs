//! Action domain.
//!
//! Every mutation of the game goes through a typed action that implements
//! [`ActionTransition`]. Player actions come from the seats at the table;
//! system actions are scheduled by the runtime to move between rounds.
//!
//! # Module Structure
//!
//! - `auction`: buying and bidding on private companies
//! - `bid_off`: the tie-break sub-auction
//! - `stock`: founding, buying and selling certificates
//! - `turn`: ending, passing and undoing stock-round turns
//! - `rounds`: system round transitions
//! - `available`: per-round action lookup

mod auction;
pub mod available;
mod bid_off;
pub mod error;
mod rounds;
mod stock;
mod transition;
mod turn;

pub use auction::{BidOnPrivateAction, BuyCheapestPrivateAction, PassPrivateAuctionAction};
pub use available::{available_actions, get_available_actions};
pub use bid_off::{BidOffBidAction, BidOffPassAction};
pub use error::{AuctionError, BidOffError, RoundError, StockError, TurnError};
pub use rounds::{BeginStockRoundAction, EndOperatingRoundAction, ResumeAuctionAction};
pub use stock::{BuyCertificateAction, BuyPoolCertificateAction, SellCertificateAction};
pub use transition::ActionTransition;
pub use turn::{EndStockTurnAction, PassStockTurnAction, UndoStockAction};

use crate::state::{CorporationId, PlayerId, PrivateId};

/// Discriminant of every action, used for availability lookups and logging.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    BuyCheapestPrivate,
    BidOnPrivate,
    PassPrivateAuction,
    BidOffBid,
    BidOffPass,
    BuyCertificate,
    BuyPoolCertificate,
    SellCertificate,
    EndStockTurn,
    PassStockTurn,
    UndoStock,
    ResumeAuction,
    BeginStockRound,
    EndOperatingRound,
}

/// Actions submitted by a seated player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    BuyCheapestPrivate(BuyCheapestPrivateAction),
    BidOnPrivate(BidOnPrivateAction),
    PassPrivateAuction(PassPrivateAuctionAction),
    BidOffBid(BidOffBidAction),
    BidOffPass(BidOffPassAction),
    BuyCertificate(BuyCertificateAction),
    BuyPoolCertificate(BuyPoolCertificateAction),
    SellCertificate(SellCertificateAction),
    EndStockTurn(EndStockTurnAction),
    PassStockTurn(PassStockTurnAction),
    UndoStock(UndoStockAction),
}

/// Round transitions scheduled by the runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemAction {
    ResumeAuction(ResumeAuctionAction),
    BeginStockRound(BeginStockRoundAction),
    EndOperatingRound(EndOperatingRoundAction),
}

/// Top-level action enum that can be either a player action or system action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Player(PlayerAction),
    System(SystemAction),
}

impl Action {
    pub fn buy_cheapest_private(player: PlayerId) -> Self {
        PlayerAction::BuyCheapestPrivate(BuyCheapestPrivateAction::new(player)).into()
    }

    pub fn bid_on_private(player: PlayerId, private: PrivateId, amount: u32) -> Self {
        PlayerAction::BidOnPrivate(BidOnPrivateAction::new(player, private, amount)).into()
    }

    pub fn pass_private_auction(player: PlayerId) -> Self {
        PlayerAction::PassPrivateAuction(PassPrivateAuctionAction::new(player)).into()
    }

    pub fn bid_off_bid(player: PlayerId, amount: u32) -> Self {
        PlayerAction::BidOffBid(BidOffBidAction::new(player, amount)).into()
    }

    pub fn bid_off_pass(player: PlayerId) -> Self {
        PlayerAction::BidOffPass(BidOffPassAction::new(player)).into()
    }

    pub fn buy_certificate(
        player: PlayerId,
        corporation: CorporationId,
        par_value: Option<u32>,
    ) -> Self {
        PlayerAction::BuyCertificate(BuyCertificateAction::new(player, corporation, par_value))
            .into()
    }

    pub fn buy_pool_certificate(player: PlayerId, corporation: CorporationId) -> Self {
        PlayerAction::BuyPoolCertificate(BuyPoolCertificateAction::new(player, corporation)).into()
    }

    pub fn sell_certificate(player: PlayerId, corporation: CorporationId, shares: u32) -> Self {
        PlayerAction::SellCertificate(SellCertificateAction::new(player, corporation, shares))
            .into()
    }

    pub fn end_stock_turn(player: PlayerId) -> Self {
        PlayerAction::EndStockTurn(EndStockTurnAction::new(player)).into()
    }

    pub fn pass_stock_turn(player: PlayerId) -> Self {
        PlayerAction::PassStockTurn(PassStockTurnAction::new(player)).into()
    }

    pub fn undo_stock(player: PlayerId) -> Self {
        PlayerAction::UndoStock(UndoStockAction::new(player)).into()
    }

    pub fn resume_auction() -> Self {
        SystemAction::ResumeAuction(ResumeAuctionAction).into()
    }

    pub fn begin_stock_round() -> Self {
        SystemAction::BeginStockRound(BeginStockRoundAction).into()
    }

    pub fn end_operating_round() -> Self {
        SystemAction::EndOperatingRound(EndOperatingRoundAction).into()
    }

    /// The acting player, or `None` for system actions.
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            Action::Player(action) => Some(action.player()),
            Action::System(_) => None,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Player(action) => action.kind(),
            Action::System(action) => action.kind(),
        }
    }

    /// Returns the snake_case string representation of the action.
    ///
    /// Used for logging and persisted action logs.
    pub fn as_snake_case(&self) -> &'static str {
        self.kind().into()
    }
}

impl PlayerAction {
    pub fn player(&self) -> PlayerId {
        match self {
            PlayerAction::BuyCheapestPrivate(action) => action.player,
            PlayerAction::BidOnPrivate(action) => action.player,
            PlayerAction::PassPrivateAuction(action) => action.player,
            PlayerAction::BidOffBid(action) => action.player,
            PlayerAction::BidOffPass(action) => action.player,
            PlayerAction::BuyCertificate(action) => action.player,
            PlayerAction::BuyPoolCertificate(action) => action.player,
            PlayerAction::SellCertificate(action) => action.player,
            PlayerAction::EndStockTurn(action) => action.player,
            PlayerAction::PassStockTurn(action) => action.player,
            PlayerAction::UndoStock(action) => action.player,
        }
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::BuyCheapestPrivate(_) => ActionKind::BuyCheapestPrivate,
            PlayerAction::BidOnPrivate(_) => ActionKind::BidOnPrivate,
            PlayerAction::PassPrivateAuction(_) => ActionKind::PassPrivateAuction,
            PlayerAction::BidOffBid(_) => ActionKind::BidOffBid,
            PlayerAction::BidOffPass(_) => ActionKind::BidOffPass,
            PlayerAction::BuyCertificate(_) => ActionKind::BuyCertificate,
            PlayerAction::BuyPoolCertificate(_) => ActionKind::BuyPoolCertificate,
            PlayerAction::SellCertificate(_) => ActionKind::SellCertificate,
            PlayerAction::EndStockTurn(_) => ActionKind::EndStockTurn,
            PlayerAction::PassStockTurn(_) => ActionKind::PassStockTurn,
            PlayerAction::UndoStock(_) => ActionKind::UndoStock,
        }
    }
}

impl SystemAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            SystemAction::ResumeAuction(_) => ActionKind::ResumeAuction,
            SystemAction::BeginStockRound(_) => ActionKind::BeginStockRound,
            SystemAction::EndOperatingRound(_) => ActionKind::EndOperatingRound,
        }
    }
}

impl From<PlayerAction> for Action {
    fn from(action: PlayerAction) -> Self {
        Self::Player(action)
    }
}

impl From<SystemAction> for Action {
    fn from(action: SystemAction) -> Self {
        Self::System(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_snake_case() {
        let action = Action::buy_certificate(PlayerId(1), CorporationId(0), Some(67));
        assert_eq!(action.as_snake_case(), "buy_certificate");
        assert_eq!(action.player(), Some(PlayerId(1)));
        assert_eq!(Action::resume_auction().as_snake_case(), "resume_auction");
        assert_eq!(Action::resume_auction().player(), None);
    }
}
