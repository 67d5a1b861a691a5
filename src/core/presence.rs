//! Per-server rosters of currently online players.
//!
//! Updates arrive from best-effort server-status watchers, one per monitored
//! game server, so every lookup miss here is a warning and a no-op rather
//! than an error. All rosters sit behind a single registry-wide mutex; that
//! is deliberately coarse so cross-server operations like
//! [`PresenceRegistry::on_player_update`] have exactly one lock to take.

use std::collections::HashMap;
use std::sync::Arc;

use log::warn;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::core::envelope::{Envelope, PlayerEventBody};
use crate::core::hub::HubHandle;
use crate::core::player::Player;
use crate::game::{GameRegistry, GameVariant};

/// Live state of one monitored server. The roster maps the game-specific
/// player identifier (resolved once per variant) to the player snapshot.
struct ServerPresence {
    server_id: i64,
    game: GameVariant,
    online: bool,
    needs_refresh: bool,
    online_players: HashMap<String, Player>,
}

/// Read-only copy of a server's presence state for the API layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerPresenceSnapshot {
    pub server_id: i64,
    pub game: &'static str,
    pub online: bool,
    pub needs_refresh: bool,
    pub player_count: usize,
    pub online_players: HashMap<String, Player>,
}

pub struct PresenceRegistry {
    games: Arc<GameRegistry>,
    hub: HubHandle,
    servers: Mutex<HashMap<i64, ServerPresence>>,
}

impl PresenceRegistry {
    pub fn new(games: Arc<GameRegistry>, hub: HubHandle) -> Self {
        Self {
            games,
            hub,
            servers: Mutex::new(HashMap::new()),
        }
    }

    /// Initialize an empty roster for a server. Re-creation replaces any
    /// prior roster for the same id.
    pub async fn create_for_server(&self, server_id: i64, game: GameVariant) {
        let mut servers = self.servers.lock().await;
        servers.insert(
            server_id,
            ServerPresence {
                server_id,
                game,
                online: false,
                needs_refresh: true,
                online_players: HashMap::new(),
            },
        );
    }

    /// Drop a server's roster once the server resource is deleted.
    pub async fn remove_server(&self, server_id: i64) {
        self.servers.lock().await.remove(&server_id);
    }

    pub async fn on_player_join(&self, server_id: i64, player: Player) {
        let envelope = {
            let mut servers = self.servers.lock().await;
            let presence = match servers.get_mut(&server_id) {
                Some(presence) => presence,
                None => {
                    warn!("on_player_join called with unknown server id {}", server_id);
                    return;
                }
            };

            let key = self.games.descriptor(presence.game).player_game_id(&player);
            let body = PlayerEventBody {
                server_id,
                id: player.id,
                player_game_id: key.clone(),
                name: player.current_name.clone(),
            };

            presence.online_players.insert(key, player);
            Envelope::PlayerJoin(body)
        };

        self.hub.broadcast(envelope);
    }

    pub async fn on_player_quit(&self, server_id: i64, player: Player) {
        let envelope = {
            let mut servers = self.servers.lock().await;
            let presence = match servers.get_mut(&server_id) {
                Some(presence) => presence,
                None => {
                    warn!("on_player_quit called with unknown server id {}", server_id);
                    return;
                }
            };

            let key = self.games.descriptor(presence.game).player_game_id(&player);
            presence.online_players.remove(&key);

            Envelope::PlayerQuit(PlayerEventBody {
                server_id,
                id: player.id,
                player_game_id: key,
                name: player.current_name,
            })
        };

        self.hub.broadcast(envelope);
    }

    /// A player's directory record changed (e.g. a new display name).
    /// Overwrites their entry in every roster they appear in, keeping the
    /// existing roster key so the identifier stays stable for the session.
    /// Does not broadcast.
    pub async fn on_player_update(&self, updated: Player) {
        let mut servers = self.servers.lock().await;

        for presence in servers.values_mut() {
            for entry in presence.online_players.values_mut() {
                if entry.id == updated.id {
                    *entry = updated.clone();
                }
            }
        }
    }

    /// Replace a server's roster from an authoritative snapshot (after
    /// reconnecting to its status feed). Supersedes all prior entries and
    /// clears the needs-refresh flag. Does not broadcast.
    pub async fn on_roster_replace(&self, server_id: i64, game: GameVariant, players: Vec<Player>) {
        let mut servers = self.servers.lock().await;
        let presence = match servers.get_mut(&server_id) {
            Some(presence) => presence,
            None => {
                warn!("on_roster_replace called with unknown server id {}", server_id);
                return;
            }
        };

        let descriptor = self.games.descriptor(game);
        let mut roster = HashMap::with_capacity(players.len());
        for player in players {
            roster.insert(descriptor.player_game_id(&player), player);
        }

        presence.game = game;
        presence.online_players = roster;
        presence.needs_refresh = false;
    }

    pub async fn on_server_online(&self, server_id: i64) {
        {
            let mut servers = self.servers.lock().await;
            match servers.get_mut(&server_id) {
                Some(presence) => presence.online = true,
                None => {
                    warn!("on_server_online called with unknown server id {}", server_id);
                    return;
                }
            }
        }

        self.hub.broadcast(Envelope::ServerOnline(server_id));
    }

    pub async fn on_server_offline(&self, server_id: i64) {
        {
            let mut servers = self.servers.lock().await;
            match servers.get_mut(&server_id) {
                Some(presence) => presence.online = false,
                None => {
                    warn!("on_server_offline called with unknown server id {}", server_id);
                    return;
                }
            }
        }

        warn!("Server {} has gone offline", server_id);
        self.hub.broadcast(Envelope::ServerOffline(server_id));
    }

    pub async fn snapshot(&self, server_id: i64) -> Option<ServerPresenceSnapshot> {
        let servers = self.servers.lock().await;
        servers.get(&server_id).map(Self::to_snapshot)
    }

    pub async fn all_snapshots(&self) -> Vec<ServerPresenceSnapshot> {
        let servers = self.servers.lock().await;
        servers.values().map(Self::to_snapshot).collect()
    }

    fn to_snapshot(presence: &ServerPresence) -> ServerPresenceSnapshot {
        ServerPresenceSnapshot {
            server_id: presence.server_id,
            game: presence.game.as_str(),
            online: presence.online,
            needs_refresh: presence.needs_refresh,
            player_count: presence.online_players.len(),
            online_players: presence.online_players.clone(),
        }
    }
}
