//! Interactive command loop over stdin.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{Duration, sleep};
use tracing::{debug, warn};

use rail_runtime::{Event, RuntimeError, RuntimeHandle, Topic};

use crate::command::{self, HELP, Input};
use crate::render;

pub struct CliApp {
    handle: RuntimeHandle,
}

impl CliApp {
    pub fn new(handle: RuntimeHandle) -> Self {
        Self { handle }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run(self) -> Result<()> {
        let printer = tokio::spawn(print_notifications(self.handle.subscribe(Topic::Notification)));

        match self.handle.query_state().await {
            Ok(state) => print!("{}", render::state(&state)),
            Err(RuntimeError::NoActiveGame) => {
                println!("No game in progress. Start one with `new <name,name,...>`.")
            }
            Err(error) => return Err(error.into()),
        }

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match command::parse(&line) {
                Ok(Input::Quit) => break,
                Ok(input) => {
                    if let Err(error) = self.dispatch(input).await {
                        println!("error: {error:#}");
                    }
                }
                Err(error) => println!("{error}"),
            }
        }

        printer.abort();
        Ok(())
    }

    async fn dispatch(&self, input: Input) -> Result<()> {
        match input {
            Input::Play(next) => {
                let state = self.handle.query_state().await?;
                let action = next.resolve(&state)?;
                debug!(target: "cli", action = action.as_snake_case(), "Submitting action");
                match self.handle.execute(action).await {
                    Ok(_) => {}
                    // Rejections already reached the player as warnings or are printed here.
                    Err(RuntimeError::Execute(error)) => println!("rejected: {error}"),
                    Err(error) => return Err(error.into()),
                }
                self.show().await?;
            }
            Input::Show => self.show().await?,
            Input::Notifications => {
                let state = self.handle.query_state().await?;
                for notification in state.notifications.iter() {
                    println!("{}", render::notification(notification));
                }
            }
            Input::Dismiss(id) => {
                if !self.handle.dismiss_notification(id).await? {
                    println!("no notification {id}");
                }
            }
            Input::Save => {
                self.handle.save().await?;
                println!("saved");
            }
            Input::NewGame(names) => {
                self.handle.new_game(names).await?;
                self.show().await?;
            }
            Input::Help => println!("{HELP}"),
            Input::Quit => {}
        }
        Ok(())
    }

    async fn show(&self) -> Result<()> {
        let state = self.handle.query_state().await?;
        print!("{}", render::state(&state));
        Ok(())
    }
}

/// Prints each notification once its stagger delay has passed.
async fn print_notifications(mut events: tokio::sync::broadcast::Receiver<Event>) {
    loop {
        match events.recv().await {
            Ok(Event::Notification(event)) => {
                let notification = event.notification;
                let delay = notification.visible_at.saturating_sub(notification.created_at);
                if delay > 0 {
                    sleep(Duration::from_millis(delay)).await;
                }
                println!("{}", render::notification(&notification));
            }
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!(target: "cli", skipped, "Notification printer fell behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
