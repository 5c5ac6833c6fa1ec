//! Session worker that owns the authoritative [`rail_core::GameState`].
//!
//! Receives commands from [`crate::RuntimeHandle`], executes actions via
//! [`rail_core::GameEngine`], publishes events to the [`EventBus`], and
//! paces the deferred auction completion check.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error, info, warn};

use rail_core::{
    Action, ExecutionOutcome, GameConfig, GameEngine, GameError, GameState, Millis,
    NotificationId, RoundKind, TransitionPhase,
};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, GameStateEvent, NotificationEvent, RoundEvent};
use crate::oracle::OracleManager;
use crate::repository::StateRepository;

/// Commands that can be sent to the session worker
pub enum Command {
    /// Seat a new game, discarding the current one.
    NewGame {
        names: Vec<String>,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Execute a player or system action.
    Execute {
        action: Action,
        reply: oneshot::Sender<Result<ExecutionOutcome>>,
    },
    /// Query the current game state (read-only).
    QueryState {
        reply: oneshot::Sender<Result<GameState>>,
    },
    DismissNotification {
        id: NotificationId,
        reply: oneshot::Sender<Result<bool>>,
    },
    /// Write the current game to the repository.
    Save { reply: oneshot::Sender<Result<()>> },
}

/// Settings the worker reads from the runtime configuration.
#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub game_config: GameConfig,
    pub auction_pacing: Duration,
    pub autosave: bool,
}

/// A completion check waiting for its pacing delay.
#[derive(Clone, Copy, Debug)]
struct ScheduledResume {
    generation: u64,
    at: Instant,
}

/// Background task that processes session commands.
pub struct SessionWorker {
    state: Option<GameState>,
    oracles: OracleManager,
    repository: Arc<dyn StateRepository>,
    settings: SessionSettings,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    /// Bumped for every new game so stale scheduled checks are dropped.
    generation: u64,
    scheduled: Option<ScheduledResume>,
}

impl SessionWorker {
    pub fn new(
        state: Option<GameState>,
        oracles: OracleManager,
        repository: Arc<dyn StateRepository>,
        settings: SessionSettings,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        match &state {
            Some(state) => info!(
                target: "runtime::worker",
                players = state.players.len(),
                nonce = state.action_nonce,
                round = %state.round,
                "SessionWorker resumed a saved game"
            ),
            None => info!(target: "runtime::worker", "SessionWorker waiting for a new game"),
        }

        let mut worker = Self {
            state,
            oracles,
            repository,
            settings,
            command_rx,
            event_bus,
            generation: 0,
            scheduled: None,
        };
        // A snapshot saved mid-auction may still owe a completion check.
        worker.schedule_pending_check();
        worker
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let resume_at = self.scheduled.map(|scheduled| scheduled.at);
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                _ = sleep_until(resume_at.unwrap_or_else(Instant::now)), if resume_at.is_some() => {
                    self.run_scheduled_check();
                }
            }
        }
        debug!(target: "runtime::worker", "Command channel closed, session worker stopping");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::NewGame { names, reply } => {
                let result = self.handle_new_game(names);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "NewGame reply channel closed (caller dropped)");
                }
            }
            Command::Execute { action, reply } => {
                let result = self.handle_execute(action);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Execute reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                let result = self.state.clone().ok_or(RuntimeError::NoActiveGame);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
            Command::DismissNotification { id, reply } => {
                let result = self
                    .state
                    .as_mut()
                    .map(|state| state.notifications.dismiss(id))
                    .ok_or(RuntimeError::NoActiveGame);
                if matches!(result, Ok(true)) {
                    self.autosave();
                }
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Dismiss reply channel closed (caller dropped)");
                }
            }
            Command::Save { reply } => {
                let result = match &self.state {
                    Some(state) => self.repository.save(state).map_err(RuntimeError::from),
                    None => Err(RuntimeError::NoActiveGame),
                };
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Save reply channel closed (caller dropped)");
                }
            }
        }
    }

    fn handle_new_game(&mut self, names: Vec<String>) -> Result<()> {
        let env = self.oracles.as_game_env();
        let state = GameState::new_game(&names, &env, &self.settings.game_config)
            .map_err(RuntimeError::NewGame)?;

        self.generation += 1;
        self.scheduled = None;
        info!(
            target: "runtime::worker",
            generation = self.generation,
            players = names.len(),
            "New game seated"
        );
        self.event_bus
            .publish(Event::GameState(GameStateEvent::GameStarted {
                generation: self.generation,
                players: state.players.iter().map(|player| player.name.clone()).collect(),
            }));
        self.state = Some(state);
        self.autosave();
        Ok(())
    }

    fn handle_execute(&mut self, action: Action) -> Result<ExecutionOutcome> {
        let outcome = self.execute_action(&action)?;
        self.schedule_pending_check();
        self.autosave();
        Ok(outcome)
    }

    /// Runs the completion check once its pacing delay has elapsed.
    fn run_scheduled_check(&mut self) {
        let Some(scheduled) = self.scheduled.take() else {
            return;
        };
        if scheduled.generation != self.generation {
            debug!(
                target: "runtime::pacing",
                scheduled = scheduled.generation,
                current = self.generation,
                "Discarding completion check from a previous game"
            );
            return;
        }

        debug!(target: "runtime::pacing", "Resuming auction completion check");
        if let Err(error) = self.execute_action(&Action::resume_auction()) {
            error!(target: "runtime::pacing", %error, "Deferred completion check failed");
            return;
        }
        self.schedule_pending_check();
        self.autosave();
    }

    /// Queues the deferred completion check, or runs it to a fixed point
    /// right away when pacing is disabled.
    fn schedule_pending_check(&mut self) {
        if !self
            .state
            .as_ref()
            .is_some_and(GameState::completion_check_pending)
        {
            return;
        }

        if self.settings.auction_pacing.is_zero() {
            while self
                .state
                .as_ref()
                .is_some_and(GameState::completion_check_pending)
            {
                if let Err(error) = self.execute_action(&Action::resume_auction()) {
                    error!(target: "runtime::pacing", %error, "Completion check failed");
                    return;
                }
            }
            return;
        }

        if self.scheduled.is_none() {
            let at = Instant::now() + self.settings.auction_pacing;
            self.scheduled = Some(ScheduledResume {
                generation: self.generation,
                at,
            });
            debug!(
                target: "runtime::pacing",
                delay_ms = self.settings.auction_pacing.as_millis() as u64,
                "Completion check scheduled"
            );
        }
    }

    /// Executes any action and publishes its events.
    ///
    /// This is the ONLY method that calls `GameEngine::execute()`, so every
    /// commit and rejection is published the same way.
    fn execute_action(&mut self, action: &Action) -> Result<ExecutionOutcome> {
        let state = self.state.as_mut().ok_or(RuntimeError::NoActiveGame)?;
        let from = state.round;
        let first = state.notifications.next_id();
        let env = self.oracles.as_game_env();

        let mut engine = GameEngine::new(state);
        engine.set_clock(now_millis());
        let result = engine.execute(env, action);

        match result {
            Ok(outcome) => {
                debug!(
                    target: "runtime::worker",
                    action = action.as_snake_case(),
                    nonce = outcome.nonce,
                    "Action committed"
                );
                self.publish_committed(action, from, &outcome);
                Ok(outcome)
            }
            Err(error) => {
                match error.phase() {
                    Some(TransitionPhase::Apply | TransitionPhase::PostValidate) => error!(
                        target: "runtime::worker",
                        action = action.as_snake_case(),
                        code = error.error_code(),
                        %error,
                        "Action failed after validation"
                    ),
                    _ => debug!(
                        target: "runtime::worker",
                        action = action.as_snake_case(),
                        code = error.error_code(),
                        %error,
                        "Action rejected"
                    ),
                }

                // Warnings are queued on the live state even when the action fails.
                let warnings: Vec<_> = self
                    .state
                    .as_ref()
                    .map(|state| state.notifications.since(first).cloned().collect())
                    .unwrap_or_default();
                for notification in warnings {
                    self.event_bus
                        .publish(Event::Notification(NotificationEvent { notification }));
                }
                self.event_bus
                    .publish(Event::GameState(GameStateEvent::ActionFailed {
                        action: *action,
                        phase: error.phase(),
                        code: error.error_code().to_string(),
                        error: error.to_string(),
                    }));
                Err(error.into())
            }
        }
    }

    fn publish_committed(&self, action: &Action, from: RoundKind, outcome: &ExecutionOutcome) {
        self.event_bus
            .publish(Event::GameState(GameStateEvent::ActionExecuted {
                action: *action,
                nonce: outcome.nonce,
                round: outcome.round,
            }));

        for notification in &outcome.notifications {
            self.event_bus.publish(Event::Notification(NotificationEvent {
                notification: notification.clone(),
            }));
        }

        if outcome.round != from {
            let stock_round_number = self
                .state
                .as_ref()
                .map(|state| state.stock_round_number)
                .unwrap_or_default();
            info!(
                target: "runtime::worker",
                from = %from,
                to = %outcome.round,
                "Round changed"
            );
            self.event_bus.publish(Event::Round(RoundEvent {
                from,
                to: outcome.round,
                stock_round_number,
            }));
        }
    }

    fn autosave(&self) {
        if !self.settings.autosave {
            return;
        }
        if let Some(state) = &self.state
            && let Err(error) = self.repository.save(state)
        {
            warn!(target: "runtime::repository", %error, "Autosave failed");
        }
    }
}

fn now_millis() -> Millis {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as Millis)
        .unwrap_or_default()
}
