//! Worker tasks that back the runtime orchestration.
//!
//! The session worker owns the game and executes commands; nothing else
//! touches the aggregate.

mod session;

pub use session::{Command, SessionSettings, SessionWorker};
