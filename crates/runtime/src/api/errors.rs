//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, repositories, and the rules
//! engine so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use rail_core::{ExecuteError, InitializationError};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no game in progress; start a new game first")]
    NoActiveGame,

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("failed to seat a new game")]
    NewGame(#[source] InitializationError),
}

impl RuntimeError {
    /// The engine rejected the action; the game itself is unaffected.
    pub fn is_rejection(&self) -> bool {
        matches!(self, RuntimeError::Execute(_))
    }
}
