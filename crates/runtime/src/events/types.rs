//! Event types for different topics.

use rail_core::{Action, Notification, RoundKind, TransitionPhase};
use serde::{Deserialize, Serialize};

/// Events related to the game lifecycle and action results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameStateEvent {
    /// A new game was seated; `generation` identifies the session.
    GameStarted { generation: u64, players: Vec<String> },

    /// A saved game was restored at startup.
    GameRestored { generation: u64, nonce: u64 },

    /// An action was committed.
    ActionExecuted {
        action: Action,
        nonce: u64,
        round: RoundKind,
    },

    /// An action was rejected; the game is unchanged.
    ActionFailed {
        action: Action,
        phase: Option<TransitionPhase>,
        code: String,
        error: String,
    },
}

/// A notification newly queued by an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub notification: Notification,
}

/// The game moved from one round kind to another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundEvent {
    pub from: RoundKind,
    pub to: RoundKind,
    pub stock_round_number: u32,
}
