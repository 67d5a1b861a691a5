//! Chat relay: fan-out of user chat to external bridges.
//!
//! Subscribers (e.g. the in-game RCON chat bridge) are invoked synchronously
//! in subscription order on the dispatching session's read path. That keeps
//! the path trivially ordered at the cost of a slow subscriber delaying that
//! one session's next message, which is acceptable at panel chat volumes.

use std::sync::Arc;

use log::warn;
use tokio::sync::RwLock;

use crate::core::envelope::{ChatMessage, InboundChat};
use crate::directory::UserDirectory;

/// Capability object handed a fully resolved chat message.
pub trait ChatSubscriber: Send + Sync {
    fn on_chat(&self, message: &ChatMessage);
}

pub struct ChatRelay {
    users: Arc<dyn UserDirectory>,
    subscribers: RwLock<Vec<Arc<dyn ChatSubscriber>>>,
}

impl ChatRelay {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self {
            users,
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Append a subscriber. No bound, no deduplication; order of
    /// subscription is order of invocation.
    pub async fn subscribe(&self, subscriber: Arc<dyn ChatSubscriber>) {
        self.subscribers.write().await.push(subscriber);
    }

    /// Dispatch a chat message received from a session. The sender is the
    /// session's authenticated user; if their name cannot be resolved the
    /// message is dropped and no subscriber runs.
    pub async fn dispatch_from_session(&self, user_id: i64, inbound: InboundChat) {
        let sender = match self.users.username_by_id(user_id).await {
            Ok(Some(name)) => name,
            Ok(None) => {
                warn!("Dropping chat from unknown user {}", user_id);
                return;
            }
            Err(e) => {
                warn!("Dropping chat from user {}: directory lookup failed: {}", user_id, e);
                return;
            }
        };

        let message = ChatMessage {
            server_id: inbound.server_id,
            message: inbound.message,
            sender,
            sent_by_user: true,
        };

        let subscribers = self.subscribers.read().await;
        for subscriber in subscribers.iter() {
            subscriber.on_chat(&message);
        }
    }
}
