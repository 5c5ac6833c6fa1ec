//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};

use rail_core::{Action, ExecutionOutcome, GameState, NotificationId};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Seats a new game, replacing any game in progress.
    pub async fn new_game(&self, names: Vec<String>) -> Result<()> {
        self.request(|reply| Command::NewGame { names, reply }).await?
    }

    /// Execute an action against the current game.
    ///
    /// A rejected action comes back as [`RuntimeError::Execute`] and leaves
    /// the game unchanged apart from any warning notification it queued.
    pub async fn execute(&self, action: Action) -> Result<ExecutionOutcome> {
        self.request(|reply| Command::Execute { action, reply }).await?
    }

    /// Query the current game state (read-only snapshot)
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await?
    }

    /// Removes a notification from the queue. Returns whether it was present.
    pub async fn dismiss_notification(&self, id: NotificationId) -> Result<bool> {
        self.request(|reply| Command::DismissNotification { id, reply })
            .await?
    }

    /// Writes the current game to the state repository.
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await?
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::GameState` - Games started, actions executed and rejected
    /// - `Topic::Notification` - Notifications queued for display
    /// - `Topic::Round` - Round transitions
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
