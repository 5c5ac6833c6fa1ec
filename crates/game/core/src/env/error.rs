//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
///
/// The engine cannot price, found, or seat anything without its tables, so a
/// missing oracle is fatal. A table that lacks an entry the engine asked for
/// is a validation failure of the caller's input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("CatalogOracle not available")]
    CatalogNotAvailable,

    #[error("MarketOracle not available")]
    MarketNotAvailable,

    #[error("PhaseOracle not available")]
    PhasesNotAvailable,

    #[error("no certificate limit defined for {0} players")]
    UnsupportedPlayerCount(usize),

    #[error("phase table is empty")]
    NoPhases,
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            CatalogNotAvailable | MarketNotAvailable | PhasesNotAvailable | NoPhases => {
                ErrorSeverity::Fatal
            }
            UnsupportedPlayerCount(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            CatalogNotAvailable => "ORACLE_CATALOG_NOT_AVAILABLE",
            MarketNotAvailable => "ORACLE_MARKET_NOT_AVAILABLE",
            PhasesNotAvailable => "ORACLE_PHASES_NOT_AVAILABLE",
            UnsupportedPlayerCount(_) => "ORACLE_UNSUPPORTED_PLAYER_COUNT",
            NoPhases => "ORACLE_NO_PHASES",
        }
    }
}
