//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition, PlayerAction, SystemAction};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))
}

/// Routes an action to its transition. Internal to `GameEngine::execute()`.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(), ExecuteError> {
    match action {
        Action::Player(action) => match action {
            PlayerAction::BuyCheapestPrivate(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BuyCheapestPrivate)
            }
            PlayerAction::BidOnPrivate(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BidOnPrivate)
            }
            PlayerAction::PassPrivateAuction(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::PassPrivateAuction)
            }
            PlayerAction::BidOffBid(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BidOffBid)
            }
            PlayerAction::BidOffPass(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BidOffPass)
            }
            PlayerAction::BuyCertificate(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BuyCertificate)
            }
            PlayerAction::BuyPoolCertificate(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BuyPoolCertificate)
            }
            PlayerAction::SellCertificate(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::SellCertificate)
            }
            PlayerAction::EndStockTurn(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::EndStockTurn)
            }
            PlayerAction::PassStockTurn(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::PassStockTurn)
            }
            PlayerAction::UndoStock(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::UndoStock)
            }
        },
        Action::System(action) => match action {
            SystemAction::ResumeAuction(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::ResumeAuction)
            }
            SystemAction::BeginStockRound(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::BeginStockRound)
            }
            SystemAction::EndOperatingRound(transition) => {
                drive_transition(transition, state, env).map_err(ExecuteError::EndOperatingRound)
            }
        },
    }
}
