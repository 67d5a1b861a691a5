//! Lookup seams toward the user and player directories.
//!
//! The realtime core never talks to the database directly; it resolves
//! names and player records through these traits. Production wires them to
//! the repository layer, tests and development use the in-memory
//! implementations in `storage::memory`.

use async_trait::async_trait;

use crate::core::player::Player;
use crate::error::Result;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Display name of a panel user, or None if the id is unknown.
    async fn username_by_id(&self, user_id: i64) -> Result<Option<String>>;
}

#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    async fn player_by_id(&self, player_id: i64) -> Result<Option<Player>>;
}

/// Existence check for server resources, used by the moderation layer to
/// validate infraction targets.
#[async_trait]
pub trait ServerDirectory: Send + Sync {
    async fn server_exists(&self, server_id: i64) -> Result<bool>;
}
