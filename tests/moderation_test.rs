use std::sync::Arc;

use warden::core::player::Player;
use warden::error::WardenError;
use warden::moderation::{InfractionDraft, InfractionKind, InfractionService, InfractionUpdate};
use warden::storage::memory::{
    MemoryInfractionStore, MemoryPlayerDirectory, MemoryServerDirectory,
};

async fn service_with(players: &[i64], servers: &[i64]) -> InfractionService {
    let player_dir = MemoryPlayerDirectory::new();
    for &id in players {
        player_dir
            .insert(Player::new(id, format!("pf-{}", id), format!("player{}", id)))
            .await;
    }

    let server_dir = MemoryServerDirectory::new();
    for &id in servers {
        server_dir.insert(id).await;
    }

    InfractionService::new(
        Arc::new(MemoryInfractionStore::new()),
        Arc::new(player_dir),
        Arc::new(server_dir),
    )
}

#[tokio::test]
async fn create_warning_assigns_id_and_attribution() {
    let service = service_with(&[1], &[1]).await;

    let warning = service
        .create(1, InfractionDraft::warning(1, 1, "Test warning reason"))
        .await
        .unwrap();

    assert_eq!(warning.id, 1);
    assert_eq!(warning.player_id, 1);
    assert_eq!(warning.user_id, 1);
    assert_eq!(warning.server_id, 1);
    assert_eq!(warning.kind, InfractionKind::Warning);
    assert_eq!(warning.reason, "Test warning reason");
    assert_eq!(warning.duration, None);
    assert!(!warning.system_action);
}

#[tokio::test]
async fn create_validates_target_existence() {
    let service = service_with(&[1], &[1]).await;

    let unknown_player = service
        .create(1, InfractionDraft::warning(404, 1, "reason"))
        .await;
    assert!(matches!(unknown_player, Err(WardenError::NotFound(_))));

    let unknown_server = service
        .create(1, InfractionDraft::warning(1, 404, "reason"))
        .await;
    assert!(matches!(unknown_server, Err(WardenError::NotFound(_))));
}

#[tokio::test]
async fn duration_rules_follow_the_kind() {
    let service = service_with(&[1], &[1]).await;

    // Mute and ban need a duration.
    let mut draft = InfractionDraft::mute(1, 1, "spam", 30);
    draft.duration = None;
    assert!(matches!(
        service.create(1, draft).await,
        Err(WardenError::ValidationError(_))
    ));

    // Warnings and kicks must not carry one.
    let mut draft = InfractionDraft::warning(1, 1, "warned");
    draft.duration = Some(10);
    assert!(matches!(
        service.create(1, draft).await,
        Err(WardenError::ValidationError(_))
    ));

    // Negative durations are rejected.
    assert!(matches!(
        service.create(1, InfractionDraft::ban(1, 1, "cheating", -5)).await,
        Err(WardenError::ValidationError(_))
    ));

    let mute = service
        .create(1, InfractionDraft::mute(1, 1, "spam", 30))
        .await
        .unwrap();
    assert_eq!(mute.duration, Some(30));
}

#[tokio::test]
async fn empty_reason_is_rejected() {
    let service = service_with(&[1], &[1]).await;

    let result = service.create(1, InfractionDraft::kick(1, 1, "   ")).await;
    assert!(matches!(result, Err(WardenError::ValidationError(_))));
}

#[tokio::test]
async fn update_changes_reason_and_respects_duration_rules() {
    let service = service_with(&[1], &[1]).await;

    let warning = service
        .create(1, InfractionDraft::warning(1, 1, "initial"))
        .await
        .unwrap();

    let updated = service
        .update(
            warning.id,
            InfractionUpdate {
                reason: Some("amended".to_string()),
                duration: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.reason, "amended");

    // A warning cannot gain a duration after the fact.
    let result = service
        .update(
            warning.id,
            InfractionUpdate {
                reason: None,
                duration: Some(5),
            },
        )
        .await;
    assert!(matches!(result, Err(WardenError::ValidationError(_))));

    // A ban keeps the same negative-duration rule as creation.
    let ban = service
        .create(1, InfractionDraft::ban(1, 1, "cheating", 60))
        .await
        .unwrap();
    let result = service
        .update(
            ban.id,
            InfractionUpdate {
                reason: None,
                duration: Some(-5),
            },
        )
        .await;
    assert!(matches!(result, Err(WardenError::ValidationError(_))));

    // An empty update is rejected.
    let result = service.update(warning.id, InfractionUpdate::default()).await;
    assert!(matches!(result, Err(WardenError::ValidationError(_))));

    // Unknown ids report not-found.
    let result = service
        .update(
            404,
            InfractionUpdate {
                reason: Some("x".to_string()),
                duration: None,
            },
        )
        .await;
    assert!(matches!(result, Err(WardenError::NotFound(_))));
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let service = service_with(&[1], &[1]).await;

    let kick = service
        .create(1, InfractionDraft::kick(1, 1, "afk"))
        .await
        .unwrap();

    service.delete(kick.id).await.unwrap();
    assert!(matches!(
        service.delete(kick.id).await,
        Err(WardenError::NotFound(_))
    ));
}

#[tokio::test]
async fn queries_filter_by_player_and_kind() {
    let service = service_with(&[1, 2], &[1]).await;

    service
        .create(1, InfractionDraft::warning(1, 1, "w1"))
        .await
        .unwrap();
    service
        .create(1, InfractionDraft::mute(1, 1, "m1", 10))
        .await
        .unwrap();
    service
        .create(1, InfractionDraft::warning(2, 1, "w2"))
        .await
        .unwrap();

    assert_eq!(service.player_infractions(1).await.unwrap().len(), 2);
    assert_eq!(service.player_infractions(2).await.unwrap().len(), 1);

    let warnings = service
        .player_infractions_of_kind(1, InfractionKind::Warning)
        .await
        .unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].reason, "w1");

    let recent = service.recent_infractions(2).await.unwrap();
    assert_eq!(recent.len(), 2);
}
