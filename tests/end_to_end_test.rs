//! The full broadcast scenario: two sessions, a server coming online, one
//! session leaving, a player joining.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use warden::core::envelope::Envelope;
use warden::core::hub::{Hub, SessionHandle};
use warden::core::player::Player;
use warden::core::presence::PresenceRegistry;
use warden::game::{GameRegistry, GameVariant};

#[tokio::test]
async fn broadcast_scenario_matches_the_wire_contract() {
    let (hub, handle) = Hub::new();
    hub.start();

    let presence = PresenceRegistry::new(Arc::new(GameRegistry::new()), handle.clone());
    presence.create_for_server(7, GameVariant::Mordhau).await;

    // Register sessions S1 and S2.
    let (tx1, mut rx1) = mpsc::channel(8);
    let (tx2, mut rx2) = mpsc::channel(8);
    let s1 = SessionHandle::new(1, tx1);
    let s1_token = s1.token();
    handle.register(s1);
    handle.register(SessionHandle::new(2, tx2));

    // server-online for server 7: both sessions receive it.
    presence.on_server_online(7).await;
    handle.session_count().await.unwrap();

    for rx in [&mut rx1, &mut rx2] {
        let envelope = rx.try_recv().unwrap();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "server-online", "body": 7})
        );
    }

    // S1 leaves; player 42 joins server 7: only S2 receives the envelope.
    handle.unregister(1, s1_token);
    presence
        .on_player_join(7, Player::new(42, "pf-42", "Steve"))
        .await;
    handle.session_count().await.unwrap();

    assert_eq!(rx1.try_recv(), Err(TryRecvError::Disconnected));

    let envelope = rx2.try_recv().unwrap();
    match &envelope {
        Envelope::PlayerJoin(body) => {
            assert_eq!(body.server_id, 7);
            assert_eq!(body.id, 42);
        }
        other => panic!("expected player-join, got {:?}", other),
    }
    assert_eq!(
        serde_json::to_value(&envelope).unwrap(),
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
