//! Common error infrastructure for rail-core.
//!
//! Domain-specific errors (e.g. `AuctionError`, `StockError`) are defined next
//! to the rules they guard. This module provides the classification trait they
//! all implement.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each action family has its own error type with specific variants
//! - **Severity Classification**: Errors are categorized so callers can decide
//!   whether to show a warning, retry with different input, or report a bug
//! - **No Partial Mutation**: An action that returns an error leaves the state untouched

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Validation error - the move is illegal in the current position.
    ///
    /// Examples: insufficient cash, bid below minimum, wrong turn
    Validation,

    /// Internal error - the caller sequenced the engine incorrectly or the
    /// state is inconsistent.
    ///
    /// Examples: unknown player id, auction action outside the auction round
    Internal,

    /// Fatal error - a ledger invariant was violated, the aggregate can no
    /// longer be trusted.
    ///
    /// Examples: certificate percentages no longer sum to 100
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all rail-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to act, not on impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Whether the engine should announce this rejection with a warning
    /// notification of its own.
    fn is_user_warning(&self) -> bool {
        false
    }
}
