use crate::env::GameEnv;
use crate::state::{GameState, InvariantError, PlayerId, invariants};

/// Defines how a concrete action mutates game state.
///
/// Implementors override the validation hooks to surface pre- and
/// post-conditions around the mutation. Hooks receive read-only access to the
/// static tables through `Env` and must stay side-effect free.
pub trait ActionTransition {
    type Error: From<InvariantError>;

    /// The acting player, or `None` for system actions.
    fn actor(&self) -> Option<PlayerId>;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly. Implementations
    /// may assume that `pre_validate` has already run successfully.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<(), Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    ///
    /// Defaults to the whole-ledger invariant check.
    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        invariants::check_all(state).map_err(Self::Error::from)
    }
}
