//! List view controller over the live HTTP client
//!
//! Exercises load, pagination, optimistic status updates with rollback,
//! confirmed deletes and draft saves against the mock REST API.

mod mock_api;

use std::sync::Arc;

use mock_api::{routes, MockApi};
use photobooth_admin::api::{ApiClient, LeadsClient, PostsClient};
use photobooth_admin::config::AdminConfig;
use photobooth_admin::error::AdminError;
use photobooth_admin::list::ListController;
use photobooth_admin::models::{EntityId, LeadStatus, PostDraft};
use photobooth_admin::notify::{Notifications, ToastKind};
use photobooth_admin::session::{Identity, MemoryStorage, SessionStore};

fn api(mock: &MockApi) -> ApiClient {
    let config = AdminConfig {
        api_base_url: mock.base_url(),
        request_timeout_secs: 2,
        ..AdminConfig::default()
    };
    let session = SessionStore::new(Arc::new(MemoryStorage::new()));
    session.login(
        Identity {
            id: None,
            username: mock_api::USERNAME.to_string(),
        },
        mock_api::TOKEN,
    );
    ApiClient::new(&config, session).unwrap()
}

fn leads_controller(mock: &MockApi, page_size: usize) -> (ListController<LeadsClient>, Notifications) {
    let notifications = Notifications::new();
    let controller = ListController::new(
        Arc::new(LeadsClient::new(api(mock))),
        page_size,
        notifications.clone(),
    );
    (controller, notifications)
}

fn status_of(controller: &ListController<LeadsClient>, id: i64) -> Option<LeadStatus> {
    let id = EntityId::from(id);
    controller.with_state(|s| s.find(&id).map(|l| l.status))
}

fn last_toast(notifications: &Notifications) -> Option<(ToastKind, String)> {
    notifications
        .pending()
        .last()
        .map(|t| (t.kind, t.message.clone()))
}

// =============================================================================
// Load and pagination
// =============================================================================

#[tokio::test]
async fn six_leads_fit_on_one_page() {
    let mock = MockApi::start().await;
    mock.seed_leads(6).await;
    let (controller, _) = leads_controller(&mock, 25);

    controller.load().await.unwrap();
    let view = controller.view();

    assert_eq!(view.rows.len(), 6);
    assert_eq!(view.total, 6);
    assert_eq!(view.total_pages, 1);
    assert!(!view.has_next);
    assert!(!view.has_prev);
    assert!(!controller.next_page());
    assert_eq!(view.range_label, "Showing 1 to 6 of 6 entries");

    mock.stop().await;
}

#[tokio::test]
async fn pages_through_a_long_list() {
    let mock = MockApi::start().await;
    mock.seed_leads(12).await;
    let (controller, _) = leads_controller(&mock, 5);

    controller.load().await.unwrap();
    assert_eq!(controller.view().total_pages, 3);

    assert!(controller.next_page());
    assert!(controller.next_page());
    let view = controller.view();
    assert_eq!(view.page, 3);
    assert_eq!(view.rows.len(), 2);
    assert_eq!(view.range_label, "Showing 11 to 12 of 12 entries");
    assert!(!controller.next_page());

    mock.stop().await;
}

#[tokio::test]
async fn failed_first_load_leaves_list_empty_and_toasts() {
    let mock = MockApi::start().await;
    mock.seed_leads(3).await;
    mock.fail(routes::LEADS_LIST).await;
    let (controller, notifications) = leads_controller(&mock, 25);

    let err = controller.load().await.unwrap_err();

    assert!(matches!(err, AdminError::FetchFailed(_)));
    let view = controller.view();
    assert!(view.rows.is_empty());
    assert!(!view.loading);
    assert_eq!(
        last_toast(&notifications),
        Some((ToastKind::Error, "Failed to load data".to_string()))
    );

    mock.stop().await;
}

#[tokio::test]
async fn failed_reload_keeps_previous_rows() {
    let mock = MockApi::start().await;
    mock.seed_leads(4).await;
    let (controller, _) = leads_controller(&mock, 25);

    controller.load().await.unwrap();
    mock.fail(routes::LEADS_LIST).await;
    assert!(controller.refresh().await.is_err());

    assert_eq!(controller.view().total, 4);

    mock.stop().await;
}

// =============================================================================
// Optimistic status updates
// =============================================================================

#[tokio::test]
async fn status_change_is_persisted() {
    let mock = MockApi::start().await;
    mock.seed_leads(3).await;
    let (controller, notifications) = leads_controller(&mock, 25);
    controller.load().await.unwrap();

    controller
        .update_status(&EntityId::from(2), LeadStatus::Converted)
        .await
        .unwrap();

    assert_eq!(status_of(&controller, 2), Some(LeadStatus::Converted));
    assert_eq!(mock.lead_status(2).await.as_deref(), Some("Converted"));
    assert_eq!(
        last_toast(&notifications),
        Some((ToastKind::Success, "Status updated to Converted".to_string()))
    );

    mock.stop().await;
}

#[tokio::test]
async fn rejected_status_change_reverts_only_that_row() {
    let mock = MockApi::start().await;
    mock.seed_leads(3).await;
    let (controller, notifications) = leads_controller(&mock, 25);
    controller.load().await.unwrap();
    controller
        .update_status(&EntityId::from(1), LeadStatus::Contacted)
        .await
        .unwrap();

    mock.fail(routes::LEADS_STATUS).await;
    let pending = controller
        .begin_status_update(&EntityId::from(2), LeadStatus::Closed)
        .unwrap();
    // Visible before the server answers
    assert_eq!(status_of(&controller, 2), Some(LeadStatus::Closed));

    let err = controller.finish_status_update(pending).await.unwrap_err();

    assert!(matches!(err, AdminError::WriteFailed(_)));
    assert_eq!(status_of(&controller, 2), Some(LeadStatus::New));
    assert_eq!(status_of(&controller, 1), Some(LeadStatus::Contacted));
    assert_eq!(status_of(&controller, 3), Some(LeadStatus::New));
    assert_eq!(
        last_toast(&notifications),
        Some((ToastKind::Error, "Failed to update status".to_string()))
    );
    assert_eq!(mock.lead_status(2).await.as_deref(), Some("New"));

    mock.stop().await;
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn declined_delete_sends_nothing() {
    let mock = MockApi::start().await;
    mock.seed_leads(2).await;
    let (controller, _) = leads_controller(&mock, 25);
    controller.load().await.unwrap();

    let deleted = controller.delete(&EntityId::from(1), |_| false).await.unwrap();

    assert!(!deleted);
    assert_eq!(controller.view().total, 2);
    assert_eq!(mock.lead_count().await, 2);

    mock.stop().await;
}

#[tokio::test]
async fn confirmed_delete_removes_row() {
    let mock = MockApi::start().await;
    mock.seed_leads(2).await;
    let (controller, notifications) = leads_controller(&mock, 25);
    controller.load().await.unwrap();

    let deleted = controller
        .delete(&EntityId::from(1), |lead| lead.customer_name == "Customer 1")
        .await
        .unwrap();

    assert!(deleted);
    assert_eq!(controller.view().total, 1);
    assert_eq!(mock.lead_count().await, 1);
    assert_eq!(
        last_toast(&notifications),
        Some((ToastKind::Success, "Deleted successfully".to_string()))
    );

    mock.stop().await;
}

#[tokio::test]
async fn failed_delete_keeps_row_and_unlocks_it() {
    let mock = MockApi::start().await;
    mock.seed_leads(2).await;
    mock.fail(routes::LEADS_DELETE).await;
    let (controller, _) = leads_controller(&mock, 25);
    controller.load().await.unwrap();

    let err = controller.delete(&EntityId::from(2), |_| true).await.unwrap_err();

    assert!(matches!(err, AdminError::DeleteFailed(_)));
    let view = controller.view();
    assert_eq!(view.total, 2);
    assert!(view.rows.iter().all(|row| !row.busy));

    mock.stop().await;
}

#[tokio::test]
async fn deleting_last_row_on_a_page_steps_back() {
    let mock = MockApi::start().await;
    mock.seed_leads(3).await;
    let (controller, _) = leads_controller(&mock, 2);
    controller.load().await.unwrap();
    assert!(controller.next_page());

    controller.delete(&EntityId::from(3), |_| true).await.unwrap();

    let view = controller.view();
    assert_eq!(view.page, 1);
    assert_eq!(view.rows.len(), 2);

    mock.stop().await;
}

// =============================================================================
// Draft saves
// =============================================================================

#[tokio::test]
async fn created_post_appears_after_refresh() {
    let mock = MockApi::start().await;
    mock.add_post(1, "Existing").await;
    let notifications = Notifications::new();
    let controller = ListController::new(
        Arc::new(PostsClient::new(api(&mock))),
        25,
        notifications.clone(),
    );
    controller.load().await.unwrap();

    let draft = PostDraft {
        title: "New booth launch".into(),
        category_id: Some(EntityId::from(1)),
        content: "<p>Say hello</p>".into(),
        ..PostDraft::default()
    };
    controller.save(None, &draft).await.unwrap();

    let titles: Vec<_> = controller
        .view()
        .rows
        .iter()
        .map(|row| row.entity.title.clone())
        .collect();
    assert_eq!(titles, vec!["Existing", "New booth launch"]);
    assert!(notifications
        .pending()
        .iter()
        .any(|t| t.message == "Created successfully"));

    mock.stop().await;
}

#[tokio::test]
async fn rejected_save_changes_nothing_locally() {
    let mock = MockApi::start().await;
    mock.add_post(1, "Existing").await;
    mock.fail(routes::POSTS_UPDATE).await;
    let controller = ListController::new(
        Arc::new(PostsClient::new(api(&mock))),
        25,
        Notifications::new(),
    );
    controller.load().await.unwrap();

    let draft = PostDraft {
        title: "Renamed".into(),
        category_id: Some(EntityId::from(1)),
        content: "<p>Body</p>".into(),
        ..PostDraft::default()
    };
    let err = controller
        .save(Some(&EntityId::from(1)), &draft)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::WriteFailed(_)));
    assert_eq!(controller.view().rows[0].entity.title, "Existing");
    assert!(!controller.view().submitting);

    mock.stop().await;
}
