//! Wire types for the realtime channel.
//!
//! Everything broadcast to browser sessions is an [`Envelope`], serialized
//! as `{"type": <tag>, "body": <variant body>}`. The only inbound payload a
//! session may send is [`InboundChat`].

use serde::{Deserialize, Serialize};

/// Tagged union broadcast to every connected session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "body", rename_all = "kebab-case")]
pub enum Envelope {
    PlayerJoin(PlayerEventBody),
    PlayerQuit(PlayerEventBody),
    /// Body is the bare server id.
    ServerOnline(i64),
    ServerOffline(i64),
    ChatReceive(ChatMessage),
}

/// Body of player-join / player-quit envelopes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerEventBody {
    pub server_id: i64,
    pub id: i64,
    pub player_game_id: String,
    pub name: String,
}

/// A chat line pushed to sessions and handed to chat relay subscribers.
/// `sent_by_user` distinguishes panel-user chat from system messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub server_id: i64,
    pub message: String,
    pub sender: String,
    pub sent_by_user: bool,
}

/// Chat payload received from a session. The nominal `user_id` is not
/// trusted; dispatch always uses the session's authenticated identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundChat {
    pub server_id: i64,
    pub user_id: i64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_online_wire_shape() {
        let envelope = Envelope::ServerOnline(7);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"type": "server-online", "body": 7}));
    }

    #[test]
    fn test_player_join_wire_shape() {
        let envelope = Envelope::PlayerJoin(PlayerEventBody {
            server_id: 7,
            id: 42,
            player_game_id: "pf-42".to_string(),
            name: "Steve".to_string(),
        });

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "player-join",
                "body": {
                    "serverId": 7,
                    "id": 42,
                    "playerGameId": "pf-42",
                    "name": "Steve"
                }
            })
        );
    }

    #[test]
    fn test_chat_receive_wire_shape() {
        let envelope = Envelope::ChatReceive(ChatMessage {
            server_id: 3,
            message: "hello".to_string(),
            sender: "admin".to_string(),
            sent_by_user: true,
        });

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["type"], "chat-receive");
        assert_eq!(value["body"]["serverId"], 3);
        assert_eq!(value["body"]["sentByUser"], true);
    }

    #[test]
    fn test_inbound_chat_decodes_camel_case() {
        let inbound: InboundChat =
            serde_json::from_str(r#"{"serverId": 5, "userId": 9, "message": "hi"}"#).unwrap();
        assert_eq!(inbound.server_id, 5);
        assert_eq!(inbound.user_id, 9);
        assert_eq!(inbound.message, "hi");
    }

    #[test]
    fn test_malformed_inbound_chat_is_an_error() {
        assert!(serde_json::from_str::<InboundChat>(r#"{"serverId": "x"}"#).is_err());
        assert!(serde_json::from_str::<InboundChat>("not json").is_err());
    }
}
