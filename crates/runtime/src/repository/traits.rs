//! Repository contract for saving and loading the game in progress.

use rail_core::GameState;

use super::Result;

/// Key under which the single saved game is stored.
pub const STATE_KEY: &str = "rail-baron-state";

/// Repository for game state persistence and loading
///
/// One game is saved at a time; each save replaces the previous snapshot.
pub trait StateRepository: Send + Sync {
    /// Replace the saved snapshot with `state`.
    fn save(&self, state: &GameState) -> Result<()>;

    /// Load the saved snapshot, if any.
    fn load(&self) -> Result<Option<GameState>>;

    /// Check whether a snapshot is saved
    fn exists(&self) -> bool;

    /// Remove the saved snapshot. Removing nothing is not an error.
    fn clear(&self) -> Result<()>;
}
