//! In-memory StateRepository implementation for tests and local runs.

use std::sync::RwLock;

use rail_core::GameState;

use crate::repository::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
#[derive(Default)]
pub struct InMemoryStateRepo {
    state: RwLock<Option<GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a game already saved.
    pub fn with_state(state: GameState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, state: &GameState) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = Some(state.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<GameState>> {
        let slot = self
            .state
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(slot.clone())
    }

    fn exists(&self) -> bool {
        self.state
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn clear(&self) -> Result<()> {
        let mut slot = self
            .state
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *slot = None;
        Ok(())
    }
}
