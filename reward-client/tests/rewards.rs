//! Reward session flows against the mock service

mod common;

use chrono::Utc;
use common::{Harness, filled_form, participant};
use reqwest::{Method, StatusCode};
use reward_client::{
    ClientError, GENERIC_ERROR_MESSAGE, RANDOM_OUTCOME_LABEL, RewardForm, RigSelection,
    SessionAction, SpinState, Toast, ToastKind,
};
use shared::models::{RewardRecord, RewardStatus};

#[tokio::test]
async fn test_empty_title_never_reaches_network() {
    let h = Harness::start().await;
    let mut form = filled_form("", 2);

    let result = h.client.rewards.create_reward(&mut form).await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(h.state().requests().is_empty());
    assert_eq!(h.notifier.last(), Some(Toast::error("Title is required")));
    assert_eq!(form.audience_count(), 2);
}

#[tokio::test]
async fn test_incomplete_participant_never_reaches_network() {
    let h = Harness::start().await;
    let mut form = filled_form("Festive Spin", 2);
    form.set_audience_count(3);

    assert!(h.client.rewards.create_reward(&mut form).await.is_err());
    assert!(h.state().requests().is_empty());
    assert_eq!(
        h.notifier.last(),
        Some(Toast::error("Participant 3 needs a name and mobile"))
    );
}

#[tokio::test]
async fn test_create_posts_once_resets_form_and_refetches() {
    let h = Harness::start().await;
    let mut form = filled_form("Festive Spin", 3);

    h.client.rewards.create_reward(&mut form).await.unwrap();

    assert_eq!(h.state().count(Method::POST, "/api/rewards"), 1);
    assert_eq!(h.state().count(Method::GET, "/api/rewards"), 1);
    assert!(form.is_pristine());
    assert_eq!(form, RewardForm::new());

    let rewards = h.client.rewards.rewards();
    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0].title, "Festive Spin");
    assert_eq!(rewards[0].audience, (0..3).map(participant).collect::<Vec<_>>());
    assert_eq!(rewards[0].spin, SpinState::Ready);
    assert_eq!(
        h.notifier.toasts(),
        vec![Toast::success("Reward created successfully")]
    );
}

#[tokio::test]
async fn test_failed_create_keeps_form_and_skips_refetch() {
    let h = Harness::start().await;
    h.state().fail_next(
        Method::POST,
        "/api/rewards",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    );
    let mut form = filled_form("Festive Spin", 3);
    let before = form.clone();

    let result = h.client.rewards.create_reward(&mut form).await;

    assert!(matches!(result, Err(ClientError::Api { status, .. }) if status == StatusCode::INTERNAL_SERVER_ERROR));
    assert_eq!(form, before);
    assert_eq!(h.state().count(Method::POST, "/api/rewards"), 1);
    assert_eq!(h.state().count(Method::GET, "/api/rewards"), 0);
    assert_eq!(h.notifier.last(), Some(Toast::error(GENERIC_ERROR_MESSAGE)));
}

#[tokio::test]
async fn test_server_refusal_message_shown_verbatim() {
    let h = Harness::start().await;
    h.state().fail_next(
        Method::POST,
        "/api/rewards",
        StatusCode::OK,
        Some("Reward quota reached"),
    );
    let mut form = filled_form("Festive Spin", 1);

    assert!(h.client.rewards.create_reward(&mut form).await.is_err());
    assert_eq!(h.notifier.last(), Some(Toast::error("Reward quota reached")));
    assert!(!form.is_pristine());
}

#[tokio::test]
async fn test_bare_not_found_uses_generic_toast() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 2).await;
    h.state().fail_next(
        Method::PUT,
        format!("/api/rewards/{id}/trigger-spin"),
        StatusCode::NOT_FOUND,
        None,
    );

    let result = h.client.rewards.trigger_spin(&id).await;

    assert!(matches!(
        result,
        Err(ClientError::Api { status, message: None }) if status == StatusCode::NOT_FOUND
    ));
    assert_eq!(h.notifier.last(), Some(Toast::error(GENERIC_ERROR_MESSAGE)));
}

#[tokio::test]
async fn test_rig_selection_reflected_on_dashboard() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 3).await;

    h.client
        .rewards
        .update_rigged_index(&id, RigSelection::Participant(2))
        .await
        .unwrap();
    let row = h.client.rewards.dashboard().remove(0);
    let selected = row.selected_rig().unwrap();
    assert_eq!(selected.selection, RigSelection::Participant(2));
    assert_eq!(selected.label, "Guest 3 (900000002)");

    h.client
        .rewards
        .update_rigged_index(&id, RigSelection::Random)
        .await
        .unwrap();
    let row = h.client.rewards.dashboard().remove(0);
    assert_eq!(row.selected_rig().unwrap().label, RANDOM_OUTCOME_LABEL);
    assert_eq!(h.state().reward(&id).unwrap().rigged_index, -1);
}

#[tokio::test]
async fn test_out_of_range_rig_refused_locally() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 2).await;
    h.state().clear_requests();

    let result = h
        .client
        .rewards
        .update_rigged_index(&id, RigSelection::Participant(5))
        .await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(h.state().requests().is_empty());
    assert_eq!(h.notifier.last().map(|t| t.kind), Some(ToastKind::Error));
}

#[tokio::test]
async fn test_run_replaced_by_reset_after_trigger() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 3).await;
    assert_eq!(h.client.rewards.dashboard()[0].action, SessionAction::Run);

    h.client.rewards.trigger_spin(&id).await.unwrap();

    let row = &h.client.rewards.dashboard()[0];
    assert_eq!(row.action, SessionAction::Reset);
    assert!(row.triggered_at.is_some());
    assert!(row.shows_rig_selector());

    // Already triggered: refused without a request
    let result = h.client.rewards.trigger_spin(&id).await;
    assert!(matches!(result, Err(ClientError::InvalidState(_))));
    assert_eq!(
        h.state()
            .count(Method::PUT, &format!("/api/rewards/{id}/trigger-spin")),
        1
    );
}

#[tokio::test]
async fn test_resolved_spin_then_reset() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 3).await;
    h.client
        .rewards
        .update_rigged_index(&id, RigSelection::Participant(1))
        .await
        .unwrap();
    h.client.rewards.trigger_spin(&id).await.unwrap();

    let winner = h.state().resolve_spin(&id).unwrap();
    assert_eq!(winner.index, 1);

    h.client.rewards.refresh().await.unwrap();
    let row = &h.client.rewards.dashboard()[0];
    assert_eq!(row.status, RewardStatus::Completed);
    assert_eq!(row.action, SessionAction::Reset);
    assert!(!row.shows_rig_selector());
    assert_eq!(row.winner.as_ref().map(|w| w.name.as_str()), Some("Guest 2"));

    // Rig is closed once completed
    let result = h
        .client
        .rewards
        .update_rigged_index(&id, RigSelection::Random)
        .await;
    assert!(matches!(result, Err(ClientError::InvalidState(_))));

    h.client.rewards.reset_spin(&id).await.unwrap();
    let reward = h.client.rewards.rewards().remove(0);
    assert_eq!(reward.spin, SpinState::Ready);
    assert_eq!(reward.rig, RigSelection::Participant(1));
}

#[tokio::test]
async fn test_reset_of_ready_session_refused_locally() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 2).await;

    let result = h.client.rewards.reset_spin(&id).await;

    assert!(matches!(result, Err(ClientError::InvalidState(_))));
    assert_eq!(
        h.state()
            .count(Method::PUT, &format!("/api/rewards/{id}/reset-spin")),
        0
    );
}

#[tokio::test]
async fn test_delete_reward_requires_confirmation() {
    let h = Harness::start().await;
    let id = h.create_reward("Festive Spin", 1).await;
    let path = format!("/api/rewards/{id}");

    let declined = h
        .client
        .rewards
        .delete_reward(&id, &|_: &str| false)
        .await;
    assert!(matches!(declined, Err(ClientError::Cancelled)));
    assert_eq!(h.state().count(Method::DELETE, &path), 0);

    h.client
        .rewards
        .delete_reward(&id, &|prompt: &str| prompt.contains("Festive Spin"))
        .await
        .unwrap();
    assert_eq!(h.state().count(Method::DELETE, &path), 1);
    assert!(h.client.rewards.rewards().is_empty());
}

#[tokio::test]
async fn test_malformed_records_skipped_on_load() {
    let h = Harness::start().await;
    h.create_reward("Valid", 2).await;
    h.state().insert_reward(RewardRecord {
        id: "broken".into(),
        title: "Completed without winner".into(),
        description: None,
        banner_url: None,
        button_text: None,
        button_link: None,
        category_id: None,
        audience: vec![participant(0)],
        status: RewardStatus::Completed,
        rigged_index: -1,
        winner: None,
        spin_triggered_at: None,
        created_at: Utc::now(),
    });

    let rewards = h.client.rewards.refresh().await.unwrap();

    assert_eq!(rewards.len(), 1);
    assert_eq!(rewards[0].title, "Valid");
    assert_eq!(h.state().list_rewards().len(), 2);
}
