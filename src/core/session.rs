//! One live browser session: a WebSocket plus its read and write loops.
//!
//! The read loop only ever accepts chat payloads; everything else coming
//! from the client is discarded. Any terminal condition on either loop
//! routes through `Hub::unregister`; connection trouble is never fatal to
//! the process.

use std::sync::Arc;

use futures_util::sink::SinkExt;
use futures_util::stream::{SplitSink, SplitStream, StreamExt};
use log::{debug, error, warn};
use tokio::sync::mpsc;
use warp::ws::{Message, WebSocket};

use crate::core::chat::ChatRelay;
use crate::core::envelope::{Envelope, InboundChat};
use crate::core::hub::{HubHandle, SessionHandle};

pub struct Session {
    user_id: i64,
    hub: HubHandle,
    relay: Arc<ChatRelay>,
    queue_depth: usize,
}

impl Session {
    /// `user_id` is the already-authenticated identity of the connecting
    /// user; verifying it is the upgrade layer's job.
    pub fn new(user_id: i64, hub: HubHandle, relay: Arc<ChatRelay>, queue_depth: usize) -> Self {
        Self {
            user_id,
            hub,
            relay,
            queue_depth,
        }
    }

    /// Drive the session until the connection dies: register with the hub,
    /// run the write loop in its own task, and consume inbound frames here.
    pub async fn run(self, ws: WebSocket) {
        let (ws_tx, mut ws_rx) = ws.split();
        let (outbound_tx, outbound_rx) = mpsc::channel(self.queue_depth);

        let handle = SessionHandle::new(self.user_id, outbound_tx);
        let token = handle.token();
        self.hub.register(handle);

        tokio::spawn(Self::write_loop(self.user_id, outbound_rx, ws_tx));

        self.read_loop(&mut ws_rx).await;

        // Idempotent; a no-op if the hub already replaced this session.
        self.hub.unregister(self.user_id, token);
    }

    /// Drain the outbound queue onto the socket. When the queue is closed
    /// (only the hub does that) and drained, release the connection.
    async fn write_loop(
        user_id: i64,
        mut outbound: mpsc::Receiver<Envelope>,
        mut ws_tx: SplitSink<WebSocket, Message>,
    ) {
        while let Some(envelope) = outbound.recv().await {
            let text = match serde_json::to_string(&envelope) {
                Ok(text) => text,
                Err(e) => {
                    error!("Failed to serialize envelope for user {}: {}", user_id, e);
                    continue;
                }
            };

            if let Err(e) = ws_tx.send(Message::text(text)).await {
                warn!("Write failed for user {}: {}", user_id, e);
                break;
            }
        }

        let _ = ws_tx.close().await;
    }

    /// Decode one frame at a time until the connection closes or errors.
    /// Well-formed chat is forwarded to the relay under this session's
    /// authenticated user id; malformed frames are discarded.
    async fn read_loop(&self, ws_rx: &mut SplitStream<WebSocket>) {
        while let Some(result) = ws_rx.next().await {
            let msg = match result {
                Ok(msg) => msg,
                Err(e) => {
                    warn!("Read error for user {}: {}", self.user_id, e);
                    break;
                }
            };

            if msg.is_close() {
                break;
            }

            let text = match msg.to_str() {
                Ok(text) => text,
                // Binary, ping and pong frames are not chat; skip them.
                Err(()) => continue,
            };

            match serde_json::from_str::<InboundChat>(text) {
                Ok(inbound) => {
                    self.relay
                        .dispatch_from_session(self.user_id, inbound)
                        .await;
                }
                Err(e) => {
                    debug!("Discarding malformed frame from user {}: {}", self.user_id, e);
                }
            }
        }
    }
}
