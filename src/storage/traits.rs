//! Abstract storage interfaces for pluggable backends.
//!
//! The realtime core holds no durable state; these traits are the boundary
//! to whatever database the deployment uses. Only the pieces the service
//! layer actually consumes are specified here.

use async_trait::async_trait;

use crate::error::Result;
use crate::moderation::{Infraction, InfractionKind, InfractionUpdate};

#[async_trait]
pub trait InfractionRepository: Send + Sync {
    /// Persist a new infraction. The store assigns the id.
    async fn create(&self, infraction: Infraction) -> Result<Infraction>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Infraction>>;

    async fn find_by_player(&self, player_id: i64) -> Result<Vec<Infraction>>;

    async fn find_by_player_and_kind(
        &self,
        player_id: i64,
        kind: InfractionKind,
    ) -> Result<Vec<Infraction>>;

    /// Apply the update to an existing record, returning the new state, or
    /// None if the id is unknown.
    async fn update(&self, id: i64, update: InfractionUpdate) -> Result<Option<Infraction>>;

    /// Returns whether a record was actually removed.
    async fn delete(&self, id: i64) -> Result<bool>;

    /// The most recent records, newest first.
    async fn recent(&self, count: usize) -> Result<Vec<Infraction>>;
}
