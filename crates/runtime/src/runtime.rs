//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a game.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use rail_core::{GameConfig, GameState};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::{Event, EventBus, Topic};
use crate::oracle::OracleManager;
use crate::repository::{FileStateRepository, InMemoryStateRepo, StateRepository};
use crate::workers::{Command, SessionSettings, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Delay before a deferred auction completion check runs. Zero runs it
    /// immediately after the sale.
    pub auction_pacing: Duration,
    /// Save after every state change and restore at startup.
    pub autosave: bool,
    pub save_dir: PathBuf,
}

impl RuntimeConfig {
    pub const DEFAULT_AUCTION_PACING: Duration = Duration::from_millis(1_000);

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAIL_SAVE_DIR` - Directory for the saved game (default: platform data dir)
    /// - `RAIL_AUTOSAVE` - Save after every change and restore on start (default: true)
    /// - `RAIL_AUCTION_PACING_MS` - Delay before deferred completion checks (default: 1000)
    /// - `RAIL_NOTIFICATION_STAGGER_MS` - Spacing between queued notifications (default: 400)
    /// - `RAIL_EVENT_BUFFER` - Per-topic event channel capacity (default: 100)
    /// - `RAIL_COMMAND_BUFFER` - Command queue size (default: 32)
    ///
    /// Unparseable values are ignored in favour of the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = env::var_os("RAIL_SAVE_DIR") {
            config.save_dir = PathBuf::from(dir);
        }
        if let Some(autosave) = read_env::<bool>("RAIL_AUTOSAVE") {
            config.autosave = autosave;
        }
        if let Some(pacing) = read_env::<u64>("RAIL_AUCTION_PACING_MS") {
            config.auction_pacing = Duration::from_millis(pacing);
        }
        if let Some(stagger) = read_env::<u64>("RAIL_NOTIFICATION_STAGGER_MS") {
            config.game_config = GameConfig::with_notification_stagger(stagger);
        }
        if let Some(capacity) = read_env::<usize>("RAIL_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("RAIL_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }

        config
    }

    /// Platform data directory for saved games.
    ///
    /// - Linux: `~/.local/share/rail-baron`
    /// - macOS: `~/Library/Application Support/rail-baron`
    /// - Windows: `%APPDATA%\rail-baron`
    /// - Fallback: `./save_data`
    pub fn default_save_dir() -> PathBuf {
        directories::ProjectDirs::from("", "", "rail-baron")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./save_data"))
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            auction_pacing: Self::DEFAULT_AUCTION_PACING,
            autosave: true,
            save_dir: Self::default_save_dir(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

/// Main runtime that orchestrates a game session
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade
/// for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to one event topic
    pub fn subscribe(&self, topic: Topic) -> tokio::sync::broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every handle clone has been dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);
        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn StateRepository>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide an initial game instead of restoring or waiting for `new_game`.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Static tables; the built-in tables are used when unset.
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// State repository; when unset, a file repository under `save_dir` is
    /// used with autosave and an in-memory one otherwise.
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime and spawn its worker.
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.unwrap_or_default();
        let repository: Arc<dyn StateRepository> = match self.repository {
            Some(repository) => repository,
            None if self.config.autosave => {
                Arc::new(FileStateRepository::new(&self.config.save_dir)?)
            }
            None => Arc::new(InMemoryStateRepo::new()),
        };

        let initial_state = match self.state {
            Some(state) => Some(state),
            None if self.config.autosave => repository.load()?,
            None => None,
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let handle = RuntimeHandle::new(command_tx, event_bus.clone());

        let settings = SessionSettings {
            game_config: self.config.game_config.clone(),
            auction_pacing: self.config.auction_pacing,
            autosave: self.config.autosave,
        };
        let worker = SessionWorker::new(
            initial_state,
            oracles,
            repository,
            settings,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pace_the_auction_and_autosave() {
        let config = RuntimeConfig::default();
        assert_eq!(config.auction_pacing, Duration::from_millis(1_000));
        assert!(config.autosave);
        assert_eq!(config.game_config.notification_stagger_ms, 400);
    }
}
