//! Background worker owning all client-side I/O.
//!
//! [`spawn`] starts a command loop that multiplexes UI commands with a
//! fixed-interval connectivity poll.  Every network operation runs in its own
//! spawned task, so rapid submissions stay independently in flight and a slow
//! request never delays the poll.  Dropping the [`WorkerHandle`]'s command
//! sender ends the loop deterministically.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use promptstash_types::Prompt;

use crate::api::ApiClient;

/// Commands sent from the UI to the worker loop.
#[derive(Debug)]
pub enum AppCommand {
    /// Save a new prompt.
    Create { content: String },
    /// Delete a prompt (the user has already confirmed).
    Delete { id: i64 },
}

/// Events reported back to the UI.
#[derive(Debug)]
pub enum AppEvent {
    /// Result of a connectivity poll.  A transport failure counts as
    /// disconnected.
    Status { connected: bool },
    /// Full list replacement (initial load, refresh, or delete reconcile).
    ListLoaded { prompts: Vec<Prompt> },
    /// A list fetch failed.
    ListFailed,
    /// A create completed; the prompt belongs at the front of the list.
    Created { prompt: Prompt },
    /// A create failed.
    CreateFailed,
    /// A delete completed; remove the item by id.
    Deleted { id: i64 },
    /// A delete failed.  The worker re-fetches the list afterwards because
    /// the deletion may have landed server-side despite the failed response.
    DeleteFailed { id: i64 },
}

/// Handle returned by [`spawn`].
pub struct WorkerHandle {
    /// Send UI commands here.  Dropping this sender stops the worker loop.
    pub commands: mpsc::UnboundedSender<AppCommand>,
    /// Drain UI events from here.
    pub events: mpsc::UnboundedReceiver<AppEvent>,
}

/// Poll interval from `PROMPTSTASH_POLL_INTERVAL_SECS` (default 5 seconds).
pub fn poll_interval_from_env() -> Duration {
    let secs = std::env::var("PROMPTSTASH_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(5);
    Duration::from_secs(secs)
}

/// Start the worker loop on the current tokio runtime.
///
/// The first connectivity poll and the initial list fetch both run
/// immediately and concurrently.
pub fn spawn(api: ApiClient, poll_interval: Duration) -> WorkerHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(run_loop(api, poll_interval, command_rx, event_tx));

    WorkerHandle {
        commands: command_tx,
        events: event_rx,
    }
}

/// Internal event loop: receives commands and drives the poll timer.
async fn run_loop(
    api: ApiClient,
    poll_interval: Duration,
    mut commands: mpsc::UnboundedReceiver<AppCommand>,
    events: mpsc::UnboundedSender<AppEvent>,
) {
    let mut poll = tokio::time::interval(poll_interval);
    poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    // The first poll tick fires immediately; the initial list fetch runs
    // concurrently with it.
    spawn_list_fetch(&api, &events);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                let api = api.clone();
                let events = events.clone();
                tokio::spawn(async move {
                    let connected = match api.status().await {
                        Ok(flag) => flag,
                        Err(e) => {
                            debug!(error = %e, "connectivity poll failed");
                            false
                        }
                    };
                    let _ = events.send(AppEvent::Status { connected });
                });
            }

            cmd = commands.recv() => {
                let Some(cmd) = cmd else {
                    debug!("command channel closed; worker loop exiting");
                    break;
                };
                handle_command(cmd, &api, &events);
            }
        }
    }
}

/// Dispatch one command.  Each operation runs in its own task so commands
/// never queue behind a slow request.
fn handle_command(cmd: AppCommand, api: &ApiClient, events: &mpsc::UnboundedSender<AppEvent>) {
    match cmd {
        AppCommand::Create { content } => {
            let api = api.clone();
            let events = events.clone();
            tokio::spawn(async move {
                match api.create(&content).await {
                    Ok(prompt) => {
                        let _ = events.send(AppEvent::Created { prompt });
                    }
                    Err(e) => {
                        warn!(error = %e, "create failed");
                        let _ = events.send(AppEvent::CreateFailed);
                    }
                }
            });
        }

        AppCommand::Delete { id } => {
            let api = api.clone();
            let events = events.clone();
            tokio::spawn(async move {
                match api.delete(id).await {
                    Ok(()) => {
                        let _ = events.send(AppEvent::Deleted { id });
                    }
                    Err(e) => {
                        warn!(id, error = %e, "delete failed; re-fetching list to reconcile");
                        let _ = events.send(AppEvent::DeleteFailed { id });
                        match api.list().await {
                            Ok(prompts) => {
                                let _ = events.send(AppEvent::ListLoaded { prompts });
                            }
                            Err(e) => {
                                warn!(error = %e, "reconcile fetch failed; keeping current list");
                            }
                        }
                    }
                }
            });
        }
    }
}

fn spawn_list_fetch(api: &ApiClient, events: &mpsc::UnboundedSender<AppEvent>) {
    let api = api.clone();
    let events = events.clone();
    tokio::spawn(async move {
        match api.list().await {
            Ok(prompts) => {
                let _ = events.send(AppEvent::ListLoaded { prompts });
            }
            Err(e) => {
                warn!(error = %e, "list fetch failed");
                let _ = events.send(AppEvent::ListFailed);
            }
        }
    });
}
