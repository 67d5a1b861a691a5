//! Realtime core: the hub, sessions, presence rosters and chat fan-out.

pub mod chat;
pub mod envelope;
pub mod hub;
pub mod player;
pub mod presence;
pub mod session;

// Re-export main components for convenience
pub use chat::{ChatRelay, ChatSubscriber};
pub use envelope::{ChatMessage, Envelope, InboundChat, PlayerEventBody};
pub use hub::{Hub, HubHandle, SessionHandle};
pub use player::Player;
pub use presence::{PresenceRegistry, ServerPresenceSnapshot};
pub use session::Session;
