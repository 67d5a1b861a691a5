use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use warp::{self, Filter};

use warden::config::ServerConfig;
use warden::constants::WS_PATH;
use warden::core::chat::ChatRelay;
use warden::core::hub::{Hub, HubHandle};
use warden::core::presence::PresenceRegistry;
use warden::game::GameRegistry;
use warden::handlers::websocket::handle_ws_client;
use warden::storage::memory::MemoryUserDirectory;

#[tokio::main]
async fn main() {
    // Initialize env
    match dotenvy::dotenv() {
        Ok(_) => info!("Environment variables loaded from .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Initialize logging
    env_logger::init();

    // Load config from the environment; a malformed value is a startup
    // failure, never something to limp past.
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Configuration: host={}, port={}", config.host, config.port);

    // Game descriptors are built exhaustively up front; a server configured
    // with an unknown game tag fails when it is registered, not mid-roster.
    let games = Arc::new(GameRegistry::new());

    // The hub is constructed and started exactly once; everything else gets
    // a handle, never the hub itself.
    let (hub, hub_handle) = Hub::new();
    hub.start();

    // User directory backing chat sender resolution. A real deployment
    // wires the database-backed directory in here.
    let users = Arc::new(MemoryUserDirectory::new());
    let relay = Arc::new(ChatRelay::new(users));

    let presence = Arc::new(PresenceRegistry::new(games, hub_handle.clone()));

    let queue_depth = config.session_queue_depth;

    // WebSocket route. The user id arrives already verified from the auth
    // layer in front of us.
    let ws_route = warp::path(WS_PATH)
        .and(warp::ws())
        .and(warp::header::<i64>("x-warden-user"))
        .and(with_hub(hub_handle.clone()))
        .and(with_relay(relay.clone()))
        .map(move |ws: warp::ws::Ws, user_id: i64, hub: HubHandle, relay: Arc<ChatRelay>| {
            ws.on_upgrade(move |socket| handle_ws_client(socket, user_id, hub, relay, queue_depth))
        });

    // Presence snapshots for the dashboard
    let presence_route = warp::path("servers")
        .and(warp::get())
        .and(with_presence(presence.clone()))
        .then(|presence: Arc<PresenceRegistry>| async move {
            warp::reply::json(&presence.all_snapshots().await)
        });

    // Health check route
    let health_route = warp::path("health").map(|| "OK");

    let routes = ws_route.or(presence_route).or(health_route);

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Warden server on {}", addr);

    warp::serve(routes).run(addr).await;
}

fn with_hub(hub: HubHandle) -> impl Filter<Extract = (HubHandle,), Error = Infallible> + Clone {
    warp::any().map(move || hub.clone())
}

fn with_relay(
    relay: Arc<ChatRelay>,
) -> impl Filter<Extract = (Arc<ChatRelay>,), Error = Infallible> + Clone {
    warp::any().map(move || relay.clone())
}

fn with_presence(
    presence: Arc<PresenceRegistry>,
) -> impl Filter<Extract = (Arc<PresenceRegistry>,), Error = Infallible> + Clone {
    warp::any().map(move || presence.clone())
}
