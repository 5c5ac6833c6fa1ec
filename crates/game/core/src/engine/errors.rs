//! Error types for action execution pipeline.

use crate::action::{
    ActionTransition, BeginStockRoundAction, BidOffBidAction, BidOffPassAction, BidOnPrivateAction,
    BuyCertificateAction, BuyCheapestPrivateAction, BuyPoolCertificateAction, EndOperatingRoundAction,
    EndStockTurnAction, PassPrivateAuctionAction, PassStockTurnAction, ResumeAuctionAction,
    SellCertificateAction, UndoStockAction,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::PlayerId;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("buy cheapest private failed: {0}")]
    BuyCheapestPrivate(PhaseError<BuyCheapestPrivateAction>),

    #[error("bid on private failed: {0}")]
    BidOnPrivate(PhaseError<BidOnPrivateAction>),

    #[error("auction pass failed: {0}")]
    PassPrivateAuction(PhaseError<PassPrivateAuctionAction>),

    #[error("bid-off bid failed: {0}")]
    BidOffBid(PhaseError<BidOffBidAction>),

    #[error("bid-off pass failed: {0}")]
    BidOffPass(PhaseError<BidOffPassAction>),

    #[error("buy certificate failed: {0}")]
    BuyCertificate(PhaseError<BuyCertificateAction>),

    #[error("buy pool certificate failed: {0}")]
    BuyPoolCertificate(PhaseError<BuyPoolCertificateAction>),

    #[error("sell certificate failed: {0}")]
    SellCertificate(PhaseError<SellCertificateAction>),

    #[error("end turn failed: {0}")]
    EndStockTurn(PhaseError<EndStockTurnAction>),

    #[error("stock pass failed: {0}")]
    PassStockTurn(PhaseError<PassStockTurnAction>),

    #[error("undo failed: {0}")]
    UndoStock(PhaseError<UndoStockAction>),

    #[error("resume auction failed: {0}")]
    ResumeAuction(PhaseError<ResumeAuctionAction>),

    #[error("begin stock round failed: {0}")]
    BeginStockRound(PhaseError<BeginStockRoundAction>),

    #[error("end operating round failed: {0}")]
    EndOperatingRound(PhaseError<EndOperatingRoundAction>),

    #[error("invalid actor: {player} acted but the current player is {current:?}")]
    ActorNotCurrent {
        player: PlayerId,
        current: Option<PlayerId>,
    },
}

impl ExecuteError {
    pub fn actor_not_current(player: PlayerId, current: Option<PlayerId>) -> Self {
        Self::ActorNotCurrent { player, current }
    }

    /// The rule error underneath the pipeline wrapper.
    pub fn inner(&self) -> Option<&dyn GameError> {
        use ExecuteError::*;
        let inner: &dyn GameError = match self {
            BuyCheapestPrivate(error) => &error.error,
            BidOnPrivate(error) => &error.error,
            PassPrivateAuction(error) => &error.error,
            BidOffBid(error) => &error.error,
            BidOffPass(error) => &error.error,
            BuyCertificate(error) => &error.error,
            BuyPoolCertificate(error) => &error.error,
            SellCertificate(error) => &error.error,
            EndStockTurn(error) => &error.error,
            PassStockTurn(error) => &error.error,
            UndoStock(error) => &error.error,
            ResumeAuction(error) => &error.error,
            BeginStockRound(error) => &error.error,
            EndOperatingRound(error) => &error.error,
            ActorNotCurrent { .. } => return None,
        };
        Some(inner)
    }

    /// Pipeline stage that failed, if the error came from a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        use ExecuteError::*;
        let phase = match self {
            BuyCheapestPrivate(error) => error.phase,
            BidOnPrivate(error) => error.phase,
            PassPrivateAuction(error) => error.phase,
            BidOffBid(error) => error.phase,
            BidOffPass(error) => error.phase,
            BuyCertificate(error) => error.phase,
            BuyPoolCertificate(error) => error.phase,
            SellCertificate(error) => error.phase,
            EndStockTurn(error) => error.phase,
            PassStockTurn(error) => error.phase,
            UndoStock(error) => error.phase,
            ResumeAuction(error) => error.phase,
            BeginStockRound(error) => error.phase,
            EndOperatingRound(error) => error.phase,
            ActorNotCurrent { .. } => return None,
        };
        Some(phase)
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self.inner() {
            Some(inner) => inner.severity(),
            None => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self.inner() {
            Some(inner) => inner.error_code(),
            None => "EXECUTE_ACTOR_NOT_CURRENT",
        }
    }

    fn is_user_warning(&self) -> bool {
        self.inner().is_some_and(|inner| inner.is_user_warning())
    }
}
