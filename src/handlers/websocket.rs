//! WebSocket upgrade glue.
//!
//! By the time a connection reaches here its user has already been
//! authenticated by the outer HTTP layer; we receive the verified user id
//! alongside the upgraded socket and hand both to a [`Session`].

use std::sync::Arc;

use log::info;
use warp::ws::WebSocket;

use crate::core::chat::ChatRelay;
use crate::core::hub::HubHandle;
use crate::core::session::Session;

/// Run one client session to completion.
pub async fn handle_ws_client(
    ws: WebSocket,
    user_id: i64,
    hub: HubHandle,
    relay: Arc<ChatRelay>,
    queue_depth: usize,
) {
    info!("Session connected for user {}", user_id);

    let session = Session::new(user_id, hub, relay, queue_depth);
    session.run(ws).await;

    info!("Session ended for user {}", user_id);
}
