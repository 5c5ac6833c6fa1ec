//! State construction and consistency errors.

use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CorporationId, PlayerId};

/// Errors raised while seating a new game.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitializationError {
    #[error("{count} players is outside the supported range {min}..={max}")]
    PlayerCount { count: usize, min: usize, max: usize },

    #[error("player in seat {seat} has an empty name")]
    EmptyName { seat: usize },

    #[error("player name '{0}' is used more than once")]
    DuplicateName(String),

    #[error("bank total {bank_total} cannot cover {required} of starting cash")]
    BankTooSmall { bank_total: u32, required: u32 },

    #[error("{players} players at {starting_cash} each overflows the cash ledger")]
    StartingCashOverflow { players: usize, starting_cash: u32 },

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(error) => error.severity(),
            Self::BankTooSmall { .. } | Self::StartingCashOverflow { .. } => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PlayerCount { .. } => "INIT_PLAYER_COUNT",
            Self::EmptyName { .. } => "INIT_EMPTY_NAME",
            Self::DuplicateName(_) => "INIT_DUPLICATE_NAME",
            Self::BankTooSmall { .. } => "INIT_BANK_TOO_SMALL",
            Self::StartingCashOverflow { .. } => "INIT_STARTING_CASH_OVERFLOW",
            Self::Oracle(error) => error.error_code(),
        }
    }
}

/// A ledger invariant no longer holds. The aggregate cannot be trusted after this.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvariantError {
    #[error("certificates of {corporation} sum to {total}%, expected 100%")]
    CertificateTotal { corporation: CorporationId, total: u32 },

    #[error("player {player} and {corporation} disagree on held certificates")]
    HoldingMismatch {
        player: PlayerId,
        corporation: CorporationId,
    },

    #[error("cash totals {actual}, expected {expected}")]
    CashTotal { expected: u32, actual: u32 },

    #[error("{corporation} has {count} president's certificates in player hands")]
    PresidentCount { corporation: CorporationId, count: usize },

    #[error("{corporation} records president {recorded:?} but the certificate is held by {holder:?}")]
    PresidentMismatch {
        corporation: CorporationId,
        recorded: Option<PlayerId>,
        holder: Option<PlayerId>,
    },

    #[error("president {president} of {corporation} holds {president_percent}% but {other} holds {other_percent}%")]
    PresidentOutweighed {
        corporation: CorporationId,
        president: PlayerId,
        president_percent: u32,
        other: PlayerId,
        other_percent: u32,
    },

    #[error("{corporation} is unstarted but its certificates have left the IPO pool")]
    UnstartedHoldings { corporation: CorporationId },
}

impl GameError for InvariantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InvariantError::*;
        match self {
            CertificateTotal { .. } => "INVARIANT_CERTIFICATE_TOTAL",
            HoldingMismatch { .. } => "INVARIANT_HOLDING_MISMATCH",
            CashTotal { .. } => "INVARIANT_CASH_TOTAL",
            PresidentCount { .. } => "INVARIANT_PRESIDENT_COUNT",
            PresidentMismatch { .. } => "INVARIANT_PRESIDENT_MISMATCH",
            PresidentOutweighed { .. } => "INVARIANT_PRESIDENT_OUTWEIGHED",
            UnstartedHoldings { .. } => "INVARIANT_UNSTARTED_HOLDINGS",
        }
    }
}
