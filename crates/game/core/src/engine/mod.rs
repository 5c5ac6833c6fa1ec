//! Rules engine and action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! action, player or system, runs through the same three-phase pipeline
//! against a working copy of the state; the copy replaces the live state only
//! when all three phases succeed, so a rejected action never leaves a partial
//! mutation behind.

pub(crate) mod auction;
mod errors;
pub(crate) mod ledger;
pub mod market;
pub(crate) mod rounds;
#[cfg(test)]
pub(crate) mod test_support;
mod transition;
pub mod turns;

pub use auction::build_summary;
pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use market::{PriceMoveError, par_position, price_at};

use crate::action::Action;
use crate::env::GameEnv;
use crate::state::{
    CorporationId, GameState, Millis, Notification, NotificationKind, PriceDirection, RoundKind,
};

/// What a successfully executed action left behind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// Action nonce after this action.
    pub nonce: u64,
    /// Round the game is in after this action.
    pub round: RoundKind,
    /// A sale was made during the auction; the completion check must be
    /// resumed with a `ResumeAuction` system action.
    pub completion_check_pending: bool,
    /// Notifications this action queued, oldest first.
    pub notifications: Vec<Notification>,
}

/// Game engine that validates and applies actions to a borrowed state.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Sets the timestamp used for notifications and action records.
    pub fn set_clock(&mut self, now: Millis) {
        self.state.clock = now;
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    ///
    /// Player actions are rejected up front unless submitted by the player
    /// whose turn it is. On any failure the live state is untouched, except
    /// that rejections flagged as user warnings queue a warning notification.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        self.validate_actor(action)?;

        let first = self.state.notifications.next_id();
        let mut working = self.state.clone();
        match transition::execute_transition(action, &mut working, &env) {
            Ok(()) => {
                working.action_nonce += 1;
                *self.state = working;
                Ok(ExecutionOutcome {
                    nonce: self.state.action_nonce,
                    round: self.state.round,
                    completion_check_pending: self.state.completion_check_pending(),
                    notifications: self.state.notifications.since(first).cloned().collect(),
                })
            }
            Err(error) => {
                if let Some(inner) = error.inner().filter(|inner| inner.is_user_warning()) {
                    let message = inner.to_string();
                    self.state.notify(NotificationKind::Warning, message);
                }
                Err(error)
            }
        }
    }

    /// Resumes the auction completion check until no sale is pending.
    ///
    /// Headless callers use this in place of paced `ResumeAuction` actions.
    pub fn settle_auction(
        &mut self,
        env: GameEnv<'_>,
    ) -> Result<Vec<ExecutionOutcome>, ExecuteError> {
        let mut outcomes = Vec::new();
        while self.state.completion_check_pending() {
            outcomes.push(self.execute(env, &Action::resume_auction())?);
        }
        Ok(outcomes)
    }

    /// Moves a corporation's token one row outside of any action.
    ///
    /// Returns the new share price. Off-grid and illegal squares are rejected
    /// without mutation.
    pub fn move_stock_price(
        &mut self,
        env: GameEnv<'_>,
        corporation: CorporationId,
        direction: PriceDirection,
    ) -> Result<u32, PriceMoveError> {
        market::move_stock_price(self.state, env.market()?, corporation, direction)
    }

    fn validate_actor(&self, action: &Action) -> Result<(), ExecuteError> {
        let Some(player) = action.player() else {
            return Ok(());
        };
        let current = self.state.current_player();
        if current != Some(player) {
            return Err(ExecuteError::actor_not_current(player, current));
        }
        Ok(())
    }
}
