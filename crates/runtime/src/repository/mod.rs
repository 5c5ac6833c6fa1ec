//! Repository layer for dynamic runtime data
//!
//! Repositories hold data that CHANGES during play: the saved game state.
//! Static game content (catalog, market grid, phases) is handled by oracles,
//! not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileStateRepository, SnapshotFormat};
pub use memory::InMemoryStateRepo;
pub use traits::{STATE_KEY, StateRepository};
