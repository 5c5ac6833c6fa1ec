//! Runtime orchestration for the railroad stock game.
//!
//! This crate wires the rules engine, the static tables, state repositories,
//! and a session worker into a cohesive async API. Consumers embed
//! [`Runtime`] to run a game, subscribe to events, and submit actions through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`workers`] keeps background tasks internal to the crate
//! - [`oracle`] and [`repository`] provide data adapters reused by other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, GameStateEvent, NotificationEvent, RoundEvent, Topic};
pub use oracle::OracleManager;
pub use repository::{
    FileStateRepository, InMemoryStateRepo, RepositoryError, STATE_KEY, SnapshotFormat,
    StateRepository,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
