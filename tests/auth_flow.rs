//! Login, session persistence and route guarding end to end
//!
//! Uses the mock REST API for `/auth/login` and a temp directory for the
//! durable session file.

mod mock_api;

use std::sync::Arc;
use std::time::Duration;

use mock_api::{routes, MockApi};
use photobooth_admin::api::{ApiClient, AuthClient};
use photobooth_admin::config::AdminConfig;
use photobooth_admin::error::AdminError;
use photobooth_admin::guard::{evaluate, GuardDecision, RedirectTarget, RouteAccess};
use photobooth_admin::session::{FileStorage, SessionStorage, SessionStore, TOKEN_KEY, USER_KEY};

fn auth_client(mock: &MockApi, session: SessionStore) -> AuthClient {
    let config = AdminConfig {
        api_base_url: mock.base_url(),
        request_timeout_secs: 2,
        ..AdminConfig::default()
    };
    AuthClient::new(ApiClient::new(&config, session).unwrap())
}

fn file_session(dir: &tempfile::TempDir) -> SessionStore {
    SessionStore::restore_from(Arc::new(FileStorage::new(dir.path())))
}

#[tokio::test]
async fn login_persists_and_survives_restart() {
    let mock = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();

    let session = file_session(&dir);
    assert_eq!(
        evaluate(RouteAccess::Protected, &session),
        GuardDecision::Redirect(RedirectTarget::Login)
    );

    let identity = auth_client(&mock, session.clone())
        .login(mock_api::USERNAME, mock_api::PASSWORD)
        .await
        .unwrap();
    assert_eq!(identity.username, "admin");
    assert_eq!(session.token().as_deref(), Some(mock_api::TOKEN));
    assert_eq!(
        evaluate(RouteAccess::LoginOnly, &session),
        GuardDecision::Redirect(RedirectTarget::Home)
    );

    // A fresh store over the same directory picks the session back up
    let restored = file_session(&dir);
    assert!(restored.is_authenticated());
    assert_eq!(restored.display_name(), "admin");
    assert_eq!(evaluate(RouteAccess::Protected, &restored), GuardDecision::Render);

    mock.stop().await;
}

#[tokio::test]
async fn logout_clears_durable_keys() {
    let mock = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);
    let auth = auth_client(&mock, session.clone());

    auth.login(mock_api::USERNAME, mock_api::PASSWORD).await.unwrap();
    auth.logout();

    assert!(!session.is_authenticated());
    let storage = FileStorage::new(dir.path());
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_KEY), None);
    assert!(!file_session(&dir).is_authenticated());

    mock.stop().await;
}

#[tokio::test]
async fn wrong_password_is_rejected_inline() {
    let mock = MockApi::start().await;
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);

    let err = auth_client(&mock, session.clone())
        .login(mock_api::USERNAME, "wrong")
        .await
        .unwrap_err();

    match err {
        AdminError::AuthFailed(message) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert!(!session.is_authenticated());
    assert_eq!(FileStorage::new(dir.path()).get(TOKEN_KEY), None);

    mock.stop().await;
}

#[tokio::test]
async fn blank_credentials_never_reach_the_server() {
    let mock = MockApi::start().await;
    mock.fail(routes::LOGIN).await;
    let dir = tempfile::tempdir().unwrap();

    let err = auth_client(&mock, file_session(&dir))
        .login("   ", "")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Enter your username and password");

    mock.stop().await;
}

#[tokio::test]
async fn server_failure_during_login_leaves_session_empty() {
    let mock = MockApi::start().await;
    mock.fail(routes::LOGIN).await;
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);

    let err = auth_client(&mock, session.clone())
        .login(mock_api::USERNAME, mock_api::PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::AuthFailed(_)));
    assert!(!session.is_authenticated());

    mock.stop().await;
}

#[tokio::test]
async fn unusable_token_fails_login_without_a_session() {
    let mock = MockApi::start().await;
    mock.issue_token("abc def").await;
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);

    let err = auth_client(&mock, session.clone())
        .login(mock_api::USERNAME, mock_api::PASSWORD)
        .await
        .unwrap_err();

    match err {
        AdminError::AuthFailed(message) => {
            assert_eq!(message, "Unexpected response from server")
        }
        other => panic!("expected AuthFailed, got {other:?}"),
    }
    assert!(!session.is_authenticated());
    assert_eq!(FileStorage::new(dir.path()).get(TOKEN_KEY), None);
    assert_eq!(
        evaluate(RouteAccess::Protected, &session),
        GuardDecision::Redirect(RedirectTarget::Login)
    );

    mock.stop().await;
}

#[tokio::test]
async fn stalled_login_times_out_as_network_error() {
    let mock = MockApi::start().await;
    mock.stall(routes::LOGIN, Duration::from_secs(10)).await;
    let dir = tempfile::tempdir().unwrap();
    let session = file_session(&dir);

    let err = auth_client(&mock, session.clone())
        .login(mock_api::USERNAME, mock_api::PASSWORD)
        .await
        .unwrap_err();

    assert_eq!(
        err.user_message(),
        "Network error. Please check your connection."
    );
    assert!(!session.is_authenticated());

    mock.stop().await;
}

#[test]
fn half_written_session_file_is_purged_on_restore() {
    let dir = tempfile::tempdir().unwrap();
    {
        let storage = FileStorage::new(dir.path());
        storage.set(TOKEN_KEY, "orphan-token");
    }

    let session = file_session(&dir);

    assert!(!session.is_authenticated());
    assert_eq!(FileStorage::new(dir.path()).get(TOKEN_KEY), None);
}
