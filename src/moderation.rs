//! Infraction records and the service that validates and stores them.
//!
//! An infraction is a moderation action recorded against a player: a
//! warning, mute, kick or ban, attributed to the staff user who issued it
//! (or marked as a system action when automation did).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use crate::directory::{PlayerDirectory, ServerDirectory};
use crate::error::{Result, WardenError};
use crate::storage::traits::InfractionRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InfractionKind {
    Warning,
    Mute,
    Kick,
    Ban,
}

impl InfractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InfractionKind::Warning => "WARNING",
            InfractionKind::Mute => "MUTE",
            InfractionKind::Kick => "KICK",
            InfractionKind::Ban => "BAN",
        }
    }

    /// Mutes and bans run for a duration; warnings and kicks are moments.
    pub fn requires_duration(&self) -> bool {
        matches!(self, InfractionKind::Mute | InfractionKind::Ban)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Infraction {
    pub id: i64,
    pub player_id: i64,
    pub user_id: i64,
    pub server_id: i64,
    #[serde(rename = "type")]
    pub kind: InfractionKind,
    pub reason: String,
    /// Minutes; only present for kinds with a duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub system_action: bool,
}

/// What a caller supplies when recording an infraction; id, timestamp and
/// attribution are filled in by the service.
#[derive(Debug, Clone)]
pub struct InfractionDraft {
    pub player_id: i64,
    pub server_id: i64,
    pub kind: InfractionKind,
    pub reason: String,
    pub duration: Option<i64>,
}

impl InfractionDraft {
    pub fn warning(player_id: i64, server_id: i64, reason: impl Into<String>) -> Self {
        Self {
            player_id,
            server_id,
            kind: InfractionKind::Warning,
            reason: reason.into(),
            duration: None,
        }
    }

    pub fn mute(player_id: i64, server_id: i64, reason: impl Into<String>, minutes: i64) -> Self {
        Self {
            player_id,
            server_id,
            kind: InfractionKind::Mute,
            reason: reason.into(),
            duration: Some(minutes),
        }
    }

    pub fn kick(player_id: i64, server_id: i64, reason: impl Into<String>) -> Self {
        Self {
            player_id,
            server_id,
            kind: InfractionKind::Kick,
            reason: reason.into(),
            duration: None,
        }
    }

    pub fn ban(player_id: i64, server_id: i64, reason: impl Into<String>, minutes: i64) -> Self {
        Self {
            player_id,
            server_id,
            kind: InfractionKind::Ban,
            reason: reason.into(),
            duration: Some(minutes),
        }
    }
}

/// Partial update of an existing infraction. Only reason and duration may
/// change after the fact.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfractionUpdate {
    pub reason: Option<String>,
    pub duration: Option<i64>,
}

pub struct InfractionService {
    repo: Arc<dyn InfractionRepository>,
    players: Arc<dyn PlayerDirectory>,
    servers: Arc<dyn ServerDirectory>,
}

impl InfractionService {
    pub fn new(
        repo: Arc<dyn InfractionRepository>,
        players: Arc<dyn PlayerDirectory>,
        servers: Arc<dyn ServerDirectory>,
    ) -> Self {
        Self {
            repo,
            players,
            servers,
        }
    }

    /// Record an infraction issued by `user_id`. Validates the draft against
    /// the kind's duration rule and checks that both the player and the
    /// server actually exist before persisting.
    pub async fn create(&self, user_id: i64, draft: InfractionDraft) -> Result<Infraction> {
        if draft.reason.trim().is_empty() {
            return Err(WardenError::ValidationError(
                "reason must not be empty".to_string(),
            ));
        }

        match (draft.kind.requires_duration(), draft.duration) {
            (true, None) => {
                return Err(WardenError::ValidationError(format!(
                    "{} requires a duration",
                    draft.kind.as_str()
                )));
            }
            (true, Some(minutes)) if minutes < 0 => {
                return Err(WardenError::ValidationError(
                    "duration must not be negative".to_string(),
                ));
            }
            (false, Some(_)) => {
                return Err(WardenError::ValidationError(format!(
                    "{} does not take a duration",
                    draft.kind.as_str()
                )));
            }
            _ => {}
        }

        if self.players.player_by_id(draft.player_id).await?.is_none() {
            return Err(WardenError::NotFound(format!(
                "player {}",
                draft.player_id
            )));
        }

        if !self.servers.server_exists(draft.server_id).await? {
            return Err(WardenError::NotFound(format!(
                "server {}",
                draft.server_id
            )));
        }

        let infraction = Infraction {
            id: 0, // assigned by the repository
            player_id: draft.player_id,
            user_id,
            server_id: draft.server_id,
            kind: draft.kind,
            reason: draft.reason,
            duration: draft.duration,
            timestamp: Utc::now(),
            system_action: false,
        };

        self.repo.create(infraction).await.map_err(|e| {
            error!("Could not persist infraction: {}", e);
            e
        })
    }

    pub async fn update(&self, id: i64, update: InfractionUpdate) -> Result<Infraction> {
        if update.reason.is_none() && update.duration.is_none() {
            return Err(WardenError::ValidationError(
                "no updated values provided".to_string(),
            ));
        }

        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| WardenError::NotFound(format!("infraction {}", id)))?;

        match update.duration {
            Some(_) if !existing.kind.requires_duration() => {
                return Err(WardenError::ValidationError(format!(
                    "{} does not take a duration",
                    existing.kind.as_str()
                )));
            }
            Some(minutes) if minutes < 0 => {
                return Err(WardenError::ValidationError(
                    "duration must not be negative".to_string(),
                ));
            }
            _ => {}
        }

        self.repo
            .update(id, update)
            .await?
            .ok_or_else(|| WardenError::NotFound(format!("infraction {}", id)))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(WardenError::NotFound(format!("infraction {}", id)))
        }
    }

    pub async fn player_infractions(&self, player_id: i64) -> Result<Vec<Infraction>> {
        self.repo.find_by_player(player_id).await
    }

    pub async fn player_infractions_of_kind(
        &self,
        player_id: i64,
        kind: InfractionKind,
    ) -> Result<Vec<Infraction>> {
        self.repo.find_by_player_and_kind(player_id, kind).await
    }

    pub async fn recent_infractions(&self, count: usize) -> Result<Vec<Infraction>> {
        self.repo.recent(count).await
    }
}
