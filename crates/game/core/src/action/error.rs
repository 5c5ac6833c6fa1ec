//! Action-specific error types.
//!
//! One enum per action family. Each implements [`GameError`] so the runtime
//! can decide between a user-facing warning and a bug report without string
//! matching.

use crate::engine::PriceMoveError;
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CorporationId, InvariantError, PlayerId, PrivateId, RoundKind};

/// Errors from the private-company auction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuctionError {
    #[error("no private auction is running")]
    NotAuctionRound,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("it is not {player}'s turn (current: {current:?})")]
    NotYourTurn {
        player: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("a bid-off must be resolved first")]
    BidOffInProgress,

    #[error("every private company is already owned")]
    NoUnownedPrivates,

    #[error("private company {0} is not up for auction")]
    UnknownPrivate(PrivateId),

    #[error("the cheapest private company {0} must be bought outright")]
    CheapestMustBeBought(PrivateId),

    #[error("private company {0} carries bids and must be resolved first")]
    CheapestHasBids(PrivateId),

    #[error("bid of ${amount} is below the minimum ${minimum}")]
    BidTooLow { amount: u32, minimum: u32 },

    #[error("insufficient funds: need ${needed}, have ${available} available")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl GameError for AuctionError {
    fn severity(&self) -> ErrorSeverity {
        use AuctionError::*;
        match self {
            NotAuctionRound | UnknownPlayer(_) => ErrorSeverity::Internal,
            Oracle(error) => error.severity(),
            Invariant(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use AuctionError::*;
        match self {
            NotAuctionRound => "AUCTION_NOT_RUNNING",
            UnknownPlayer(_) => "AUCTION_UNKNOWN_PLAYER",
            NotYourTurn { .. } => "AUCTION_NOT_YOUR_TURN",
            BidOffInProgress => "AUCTION_BID_OFF_IN_PROGRESS",
            NoUnownedPrivates => "AUCTION_NO_UNOWNED_PRIVATES",
            UnknownPrivate(_) => "AUCTION_UNKNOWN_PRIVATE",
            CheapestMustBeBought(_) => "AUCTION_CHEAPEST_MUST_BE_BOUGHT",
            CheapestHasBids(_) => "AUCTION_CHEAPEST_HAS_BIDS",
            BidTooLow { .. } => "AUCTION_BID_TOO_LOW",
            InsufficientFunds { .. } => "AUCTION_INSUFFICIENT_FUNDS",
            Oracle(error) => error.error_code(),
            Invariant(error) => error.error_code(),
        }
    }

    fn is_user_warning(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

/// Errors from the tie-break sub-auction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BidOffError {
    #[error("no bid-off is running")]
    NoBidOff,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("it is not {player}'s turn in the bid-off (current: {current:?})")]
    NotYourTurn {
        player: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("bid of ${amount} does not exceed the current ${current}")]
    BidTooLow { amount: u32, current: u32 },

    #[error("insufficient funds: need ${needed}, have ${available} available")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl GameError for BidOffError {
    fn severity(&self) -> ErrorSeverity {
        use BidOffError::*;
        match self {
            NoBidOff | UnknownPlayer(_) => ErrorSeverity::Internal,
            Auction(error) => error.severity(),
            Invariant(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use BidOffError::*;
        match self {
            NoBidOff => "BID_OFF_NOT_RUNNING",
            UnknownPlayer(_) => "BID_OFF_UNKNOWN_PLAYER",
            NotYourTurn { .. } => "BID_OFF_NOT_YOUR_TURN",
            BidTooLow { .. } => "BID_OFF_BID_TOO_LOW",
            InsufficientFunds { .. } => "BID_OFF_INSUFFICIENT_FUNDS",
            Auction(error) => error.error_code(),
            Invariant(error) => error.error_code(),
        }
    }

    fn is_user_warning(&self) -> bool {
        matches!(self, Self::InsufficientFunds { .. })
    }
}

/// Errors from buying and selling certificates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StockError {
    #[error("no stock round is running")]
    NotStockRound,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("unknown corporation {0}")]
    UnknownCorporation(CorporationId),

    #[error("it is not {player}'s turn (current: {current:?})")]
    NotYourTurn {
        player: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("only one purchase is allowed per turn")]
    AlreadyPurchased,

    #[error("cannot buy {0} after selling it this round")]
    SoldThisRound(CorporationId),

    #[error("a par value is required to start {0}")]
    ParValueRequired(CorporationId),

    #[error("${0} is not a permitted par value")]
    InvalidParValue(u32),

    #[error("{0} has not been started")]
    NotStarted(CorporationId),

    #[error("no certificates of {0} left in the IPO pool")]
    IpoEmpty(CorporationId),

    #[error("no certificates of {0} in the bank pool")]
    BankPoolEmpty(CorporationId),

    #[error("Insufficient funds: need ${needed}, have ${available}")]
    InsufficientFunds { needed: u32, available: u32 },

    #[error("Certificate limit of {limit} reached")]
    CertificateLimit { limit: usize },

    #[error("Holding {percent}% of {corporation} would exceed the 60% limit")]
    HoldingLimit {
        corporation: CorporationId,
        percent: u32,
    },

    #[error("the bank pool would hold {percent}% of {corporation}, above the 50% limit")]
    BankPoolLimit {
        corporation: CorporationId,
        percent: u32,
    },

    #[error("must sell at least one share")]
    ZeroShares,

    #[error("cannot sell {requested} shares of {corporation}, only {held} held")]
    InsufficientShares {
        corporation: CorporationId,
        requested: u32,
        held: u32,
    },

    #[error("Cannot sell the president's certificate of {0}: no other player holds 20%")]
    PresidentCertificateBlocked(CorporationId),

    #[error("{player} does not hold the certificate being moved")]
    CertificateNotHeld { player: PlayerId },

    #[error("the bank cannot pay ${needed}")]
    BankBroken { needed: u32 },

    #[error(transparent)]
    PriceMove(#[from] PriceMoveError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl GameError for StockError {
    fn severity(&self) -> ErrorSeverity {
        use StockError::*;
        match self {
            NotStockRound | UnknownPlayer(_) | UnknownCorporation(_) | CertificateNotHeld { .. } => {
                ErrorSeverity::Internal
            }
            BankBroken { .. } => ErrorSeverity::Fatal,
            PriceMove(error) => error.severity(),
            Oracle(error) => error.severity(),
            Invariant(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use StockError::*;
        match self {
            NotStockRound => "STOCK_NOT_RUNNING",
            UnknownPlayer(_) => "STOCK_UNKNOWN_PLAYER",
            UnknownCorporation(_) => "STOCK_UNKNOWN_CORPORATION",
            NotYourTurn { .. } => "STOCK_NOT_YOUR_TURN",
            AlreadyPurchased => "STOCK_ALREADY_PURCHASED",
            SoldThisRound(_) => "STOCK_SOLD_THIS_ROUND",
            ParValueRequired(_) => "STOCK_PAR_VALUE_REQUIRED",
            InvalidParValue(_) => "STOCK_INVALID_PAR_VALUE",
            NotStarted(_) => "STOCK_NOT_STARTED",
            IpoEmpty(_) => "STOCK_IPO_EMPTY",
            BankPoolEmpty(_) => "STOCK_BANK_POOL_EMPTY",
            InsufficientFunds { .. } => "STOCK_INSUFFICIENT_FUNDS",
            CertificateLimit { .. } => "STOCK_CERTIFICATE_LIMIT",
            HoldingLimit { .. } => "STOCK_HOLDING_LIMIT",
            BankPoolLimit { .. } => "STOCK_BANK_POOL_LIMIT",
            ZeroShares => "STOCK_ZERO_SHARES",
            InsufficientShares { .. } => "STOCK_INSUFFICIENT_SHARES",
            PresidentCertificateBlocked(_) => "STOCK_PRESIDENT_CERTIFICATE_BLOCKED",
            CertificateNotHeld { .. } => "STOCK_CERTIFICATE_NOT_HELD",
            BankBroken { .. } => "STOCK_BANK_BROKEN",
            PriceMove(error) => error.error_code(),
            Oracle(error) => error.error_code(),
            Invariant(error) => error.error_code(),
        }
    }

    fn is_user_warning(&self) -> bool {
        use StockError::*;
        matches!(
            self,
            InsufficientFunds { .. }
                | CertificateLimit { .. }
                | HoldingLimit { .. }
                | BankPoolLimit { .. }
                | PresidentCertificateBlocked(_)
        )
    }
}

/// Errors from stock-round turn control (end turn, pass, undo).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("no stock round is running")]
    NotStockRound,

    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("it is not {player}'s turn (current: {current:?})")]
    NotYourTurn {
        player: PlayerId,
        current: Option<PlayerId>,
    },

    #[error("nothing was done this turn; pass instead")]
    NoActionTaken,

    #[error("cannot pass after acting this turn; end the turn instead")]
    AlreadyActed,

    #[error("nothing to undo this turn")]
    NothingToUndo,

    #[error(transparent)]
    PriceMove(#[from] PriceMoveError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        use TurnError::*;
        match self {
            NotStockRound | UnknownPlayer(_) => ErrorSeverity::Internal,
            PriceMove(error) => error.severity(),
            Oracle(error) => error.severity(),
            Invariant(error) => error.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use TurnError::*;
        match self {
            NotStockRound => "TURN_NOT_STOCK_ROUND",
            UnknownPlayer(_) => "TURN_UNKNOWN_PLAYER",
            NotYourTurn { .. } => "TURN_NOT_YOUR_TURN",
            NoActionTaken => "TURN_NO_ACTION_TAKEN",
            AlreadyActed => "TURN_ALREADY_ACTED",
            NothingToUndo => "TURN_NOTHING_TO_UNDO",
            PriceMove(error) => error.error_code(),
            Oracle(error) => error.error_code(),
            Invariant(error) => error.error_code(),
        }
    }
}

/// Errors from round transitions driven by system actions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundError {
    #[error("no private auction is running")]
    NoAuction,

    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: RoundKind, to: RoundKind },

    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    PriceMove(#[from] PriceMoveError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Invariant(#[from] InvariantError),
}

impl GameError for RoundError {
    fn severity(&self) -> ErrorSeverity {
        use RoundError::*;
        match self {
            NoAuction | InvalidTransition { .. } => ErrorSeverity::Internal,
            Auction(error) => error.severity(),
            PriceMove(error) => error.severity(),
            Oracle(error) => error.severity(),
            Invariant(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use RoundError::*;
        match self {
            NoAuction => "ROUND_NO_AUCTION",
            InvalidTransition { .. } => "ROUND_INVALID_TRANSITION",
            Auction(error) => error.error_code(),
            PriceMove(error) => error.error_code(),
            Oracle(error) => error.error_code(),
            Invariant(error) => error.error_code(),
        }
    }
}
