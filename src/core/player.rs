//! Player snapshot as seen by the presence and moderation layers.
//!
//! The player directory owns the canonical record; everything in here is a
//! transient copy handed to us by server-status watchers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    /// Platform account id (e.g. PlayFab for Mordhau). Which attribute acts
    /// as a server roster key depends on the game variant.
    pub platform_id: String,
    pub last_seen: DateTime<Utc>,
    pub current_name: String,
    /// Previous display names, most recent first; the current name is not
    /// repeated here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub previous_names: Vec<String>,
}

impl Player {
    pub fn new(id: i64, platform_id: impl Into<String>, current_name: impl Into<String>) -> Self {
        Self {
            id,
            platform_id: platform_id.into(),
            last_seen: Utc::now(),
            current_name: current_name.into(),
            previous_names: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new(42, "pf-42", "Steve");
        assert_eq!(player.id, 42);
        assert_eq!(player.platform_id, "pf-42");
        assert_eq!(player.current_name, "Steve");
        assert!(player.previous_names.is_empty());
    }

    #[test]
    fn test_player_json_field_names() {
        let player = Player::new(7, "pf-7", "Alex");
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["platformId"], "pf-7");
        assert_eq!(json["currentName"], "Alex");
    }
}
