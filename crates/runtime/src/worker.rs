//! Background simulation worker.
//!
//! Owns the authoritative [`GameSession`] and is its only mutator. A tokio
//! interval drives simulation ticks (animals, then quests); commands from
//! [`SessionHandle`] interleave with ticks on the same task, so there is
//! exactly one logical thread of mutation and no locking anywhere.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{error, info};

use fable_core::{ActionPayload, GameState, PendingAction, TickOutcome, ViewportBounds};

use crate::error::{Result, RuntimeError};
use crate::narrator::Narrator;
use crate::session::{GameSession, SessionOutcome};

/// Commands the handle can send to the worker.
enum Command {
    Act {
        action_type: String,
        payload: ActionPayload,
        reply: oneshot::Sender<Result<SessionOutcome>>,
    },
    CompletePending {
        pending: PendingAction,
        reply: oneshot::Sender<Result<SessionOutcome>>,
    },
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
    SetViewport {
        viewport: Option<ViewportBounds>,
    },
    SetDebug {
        key: String,
        value: bool,
    },
}

/// Client-side handle to a spawned worker.
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
}

impl SessionHandle {
    pub async fn act(
        &self,
        action_type: impl Into<String>,
        payload: ActionPayload,
    ) -> Result<SessionOutcome> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::Act {
                action_type: action_type.into(),
                payload,
                reply,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    pub async fn complete_pending(&self, pending: PendingAction) -> Result<SessionOutcome> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::CompletePending { pending, reply })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }

    /// A snapshot of the current state.
    pub async fn state(&self) -> Result<GameState> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(Command::QueryState { reply })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;
        rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Updates the culling bounds used by the simulation ticks.
    pub async fn set_viewport(&self, viewport: Option<ViewportBounds>) -> Result<()> {
        self.command_tx
            .send(Command::SetViewport { viewport })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub async fn set_debug(&self, key: impl Into<String>, value: bool) -> Result<()> {
        self.command_tx
            .send(Command::SetDebug {
                key: key.into(),
                value,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}

/// The worker task: one session, one tick interval, one command queue.
pub struct SimulationWorker<N: Narrator> {
    session: GameSession<N>,
    command_rx: mpsc::Receiver<Command>,
    tick_interval: Duration,
    viewport: Option<ViewportBounds>,
}

impl<N: Narrator + 'static> SimulationWorker<N> {
    /// Spawns the worker and returns its handle plus the join handle.
    pub fn spawn(
        session: GameSession<N>,
        tick_interval: Duration,
    ) -> (SessionHandle, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let worker = SimulationWorker {
            session,
            command_rx,
            tick_interval,
            viewport: None,
        };
        let join = tokio::spawn(worker.run());
        (SessionHandle { command_tx }, join)
    }

    async fn run(mut self) {
        info!(game = %self.session.game().definition.name, "simulation worker started");
        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                command = self.command_rx.recv() => {
                    match command {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    self.run_tick();
                }
            }
        }
        info!("simulation worker stopped");
    }

    fn run_tick(&mut self) {
        match self.session.tick(self.viewport.as_ref()) {
            Ok(TickOutcome { messages, .. }) => {
                for message in messages {
                    info!(message, "simulation");
                }
            }
            Err(error) => error!(%error, "simulation tick failed"),
        }
    }

    async fn handle_command(&mut self, command: Command) {
        match command {
            Command::Act {
                action_type,
                payload,
                reply,
            } => {
                let result = self.session.act(&action_type, &payload).await;
                let _ = reply.send(result);
            }
            Command::CompletePending { pending, reply } => {
                let _ = reply.send(self.session.complete_pending(&pending));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.session.game().instance.clone());
            }
            Command::SetViewport { viewport } => {
                self.viewport = viewport;
            }
            Command::SetDebug { key, value } => {
                self.session.settings_mut().set(key, value);
            }
        }
    }
}
