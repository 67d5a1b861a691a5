//! Connection hub: the single owner of the live-session set.
//!
//! Register, unregister and broadcast are all funneled through one command
//! queue and processed in submission order by one control loop, so the
//! session set is never touched from two places at once. Delivery into each
//! session uses that session's own bounded queue with `try_send`: a slow
//! client loses its copy of a broadcast instead of stalling everyone else.

use std::collections::HashMap;

use log::{debug, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::core::envelope::Envelope;
use crate::error::{Result, WardenError};

/// Commands accepted by the hub control loop.
pub enum HubCommand {
    Register(SessionHandle),
    Unregister { user_id: i64, token: Uuid },
    Broadcast(Envelope),
    SessionCount(oneshot::Sender<usize>),
}

/// The hub's delivery handle to one session: the authenticated user id, a
/// token identifying this particular connection, and the sending half of
/// the session's outbound queue. Dropping the handle closes the queue,
/// which is how the hub (and only the hub) shuts a session down.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    user_id: i64,
    token: Uuid,
    outbound: mpsc::Sender<Envelope>,
}

impl SessionHandle {
    pub fn new(user_id: i64, outbound: mpsc::Sender<Envelope>) -> Self {
        Self {
            user_id,
            token: Uuid::new_v4(),
            outbound,
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Token distinguishing this connection from a later reconnect by the
    /// same user.
    pub fn token(&self) -> Uuid {
        self.token
    }
}

/// Cloneable submission side of the hub. Everything is non-blocking; once
/// the control loop has stopped, commands are dropped with a warning.
#[derive(Clone)]
pub struct HubHandle {
    commands: mpsc::UnboundedSender<HubCommand>,
}

impl HubHandle {
    /// Admit a session into the live set. A session already registered for
    /// the same user is replaced and its outbound queue closed.
    pub fn register(&self, session: SessionHandle) {
        self.submit(HubCommand::Register(session));
    }

    /// Remove a session. Unknown (or already replaced) sessions are a no-op.
    pub fn unregister(&self, user_id: i64, token: Uuid) {
        self.submit(HubCommand::Unregister { user_id, token });
    }

    /// Queue an envelope for delivery to every currently registered session.
    pub fn broadcast(&self, envelope: Envelope) {
        self.submit(HubCommand::Broadcast(envelope));
    }

    /// Number of currently registered sessions.
    pub async fn session_count(&self) -> Result<usize> {
        let (tx, rx) = oneshot::channel();
        self.submit(HubCommand::SessionCount(tx));
        rx.await.map_err(|_| WardenError::HubClosed)
    }

    fn submit(&self, command: HubCommand) {
        if self.commands.send(command).is_err() {
            warn!("Hub control loop has stopped; dropping command");
        }
    }
}

/// Owner of the live-session set. Constructed once per process and consumed
/// by [`Hub::start`], which spawns the control loop.
pub struct Hub {
    commands: mpsc::UnboundedReceiver<HubCommand>,
    sessions: HashMap<i64, SessionHandle>,
}

impl Hub {
    pub fn new() -> (Self, HubHandle) {
        let (tx, rx) = mpsc::unbounded_channel();

        let hub = Self {
            commands: rx,
            sessions: HashMap::new(),
        };

        (hub, HubHandle { commands: tx })
    }

    /// Spawn the control loop. Consumes the hub, so it can only run once.
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        info!("Hub control loop started");

        while let Some(command) = self.commands.recv().await {
            self.handle_command(command);
        }

        info!("Hub control loop stopped");
    }

    fn handle_command(&mut self, command: HubCommand) {
        match command {
            HubCommand::Register(session) => {
                let user_id = session.user_id();
                if self.sessions.insert(user_id, session).is_some() {
                    // The displaced handle is dropped here, closing the old
                    // session's outbound queue.
                    info!("Replaced existing session for user {}", user_id);
                } else {
                    info!(
                        "Registered session for user {} ({} connected)",
                        user_id,
                        self.sessions.len()
                    );
                }
            }
            HubCommand::Unregister { user_id, token } => {
                let matches = self
                    .sessions
                    .get(&user_id)
                    .map(|session| session.token() == token)
                    .unwrap_or(false);

                if matches {
                    self.sessions.remove(&user_id);
                    info!(
                        "Unregistered session for user {} ({} connected)",
                        user_id,
                        self.sessions.len()
                    );
                } else {
                    debug!("Ignoring unregister for unknown session of user {}", user_id);
                }
            }
            HubCommand::Broadcast(envelope) => self.deliver(envelope),
            HubCommand::SessionCount(reply) => {
                let _ = reply.send(self.sessions.len());
            }
        }
    }

    fn deliver(&mut self, envelope: Envelope) {
        let mut dead = Vec::new();

        for (user_id, session) in &self.sessions {
            match session.outbound.try_send(envelope.clone()) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("Outbound queue full for user {}; dropping broadcast", user_id);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    dead.push(*user_id);
                }
            }
        }

        for user_id in dead {
            self.sessions.remove(&user_id);
            debug!("Evicted closed session for user {}", user_id);
        }
    }
}
