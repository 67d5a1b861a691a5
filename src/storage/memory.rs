//! In-memory storage implementation for development and testing.
//!
//! Keeps everything in process memory behind async locks. Suitable for
//! tests and small single-node deployments; production backends implement
//! the same traits over a real database.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

use crate::core::player::Player;
use crate::directory::{PlayerDirectory, ServerDirectory, UserDirectory};
use crate::error::Result;
use crate::moderation::{Infraction, InfractionKind, InfractionUpdate};
use crate::storage::traits::InfractionRepository;

/// In-memory infraction store with a monotonic id sequence.
pub struct MemoryInfractionStore {
    infractions: RwLock<HashMap<i64, Infraction>>,
    next_id: RwLock<i64>,
}

impl MemoryInfractionStore {
    pub fn new() -> Self {
        Self {
            infractions: RwLock::new(HashMap::new()),
            next_id: RwLock::new(1),
        }
    }

    async fn generate_id(&self) -> i64 {
        let mut id = self.next_id.write().await;
        let current = *id;
        *id += 1;
        current
    }
}

impl Default for MemoryInfractionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InfractionRepository for MemoryInfractionStore {
    async fn create(&self, mut infraction: Infraction) -> Result<Infraction> {
        infraction.id = self.generate_id().await;
        self.infractions
            .write()
            .await
            .insert(infraction.id, infraction.clone());
        Ok(infraction)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Infraction>> {
        Ok(self.infractions.read().await.get(&id).cloned())
    }

    async fn find_by_player(&self, player_id: i64) -> Result<Vec<Infraction>> {
        let infractions = self.infractions.read().await;
        let mut found: Vec<Infraction> = infractions
            .values()
            .filter(|i| i.player_id == player_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(found)
    }

    async fn find_by_player_and_kind(
        &self,
        player_id: i64,
        kind: InfractionKind,
    ) -> Result<Vec<Infraction>> {
        let mut found = self.find_by_player(player_id).await?;
        found.retain(|i| i.kind == kind);
        Ok(found)
    }

    async fn update(&self, id: i64, update: InfractionUpdate) -> Result<Option<Infraction>> {
        let mut infractions = self.infractions.write().await;

        let infraction = match infractions.get_mut(&id) {
            Some(infraction) => infraction,
            None => return Ok(None),
        };

        if let Some(reason) = update.reason {
            infraction.reason = reason;
        }
        if let Some(duration) = update.duration {
            infraction.duration = Some(duration);
        }

        Ok(Some(infraction.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.infractions.write().await.remove(&id).is_some())
    }

    async fn recent(&self, count: usize) -> Result<Vec<Infraction>> {
        let infractions = self.infractions.read().await;
        let mut all: Vec<Infraction> = infractions.values().cloned().collect();
        all.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        all.truncate(count);
        Ok(all)
    }
}

/// In-memory user directory: user id to display name.
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<i64, String>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, user_id: i64, username: impl Into<String>) {
        self.users.write().await.insert(user_id, username.into());
    }
}

impl Default for MemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn username_by_id(&self, user_id: i64) -> Result<Option<String>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

/// In-memory player directory keyed by numeric player id.
pub struct MemoryPlayerDirectory {
    players: RwLock<HashMap<i64, Player>>,
}

impl MemoryPlayerDirectory {
    pub fn new() -> Self {
        Self {
            players: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, player: Player) {
        self.players.write().await.insert(player.id, player);
    }
}

impl Default for MemoryPlayerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerDirectory for MemoryPlayerDirectory {
    async fn player_by_id(&self, player_id: i64) -> Result<Option<Player>> {
        Ok(self.players.read().await.get(&player_id).cloned())
    }
}

/// In-memory set of known server ids.
pub struct MemoryServerDirectory {
    servers: RwLock<HashSet<i64>>,
}

impl MemoryServerDirectory {
    pub fn new() -> Self {
        Self {
            servers: RwLock::new(HashSet::new()),
        }
    }

    pub async fn insert(&self, server_id: i64) {
        self.servers.write().await.insert(server_id);
    }
}

impl Default for MemoryServerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServerDirectory for MemoryServerDirectory {
    async fn server_exists(&self, server_id: i64) -> Result<bool> {
        Ok(self.servers.read().await.contains(&server_id))
    }
}
