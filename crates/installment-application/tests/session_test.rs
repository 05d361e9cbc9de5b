mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{PASSWORD, SessionFixture};
use installment_application::RouteGuard;
use installment_application::page::LoginPage;
use installment_core::error::AdminError;
use installment_core::route::{Route, RouteDecision};
use installment_core::session::{AuthUser, SessionPhase, TokenSource};
use installment_core::storage::{KeyValueStorage, SESSION_STORAGE_KEY};
use installment_infrastructure::MemoryStorage;
use serde_json::json;

#[tokio::test]
async fn test_bootstrap_empty_store_is_anonymous() {
    let fixture = SessionFixture::new();
    assert_eq!(fixture.session.phase().await, SessionPhase::Bootstrapping);
    assert_eq!(fixture.session.bootstrap().await, SessionPhase::Anonymous);
    assert!(!fixture.session.is_authenticated().await);
}

#[tokio::test]
async fn test_bootstrap_corrupted_store_is_anonymous() {
    let storage = Arc::new(MemoryStorage::with_items([(SESSION_STORAGE_KEY, "{\"token\":")]));
    let fixture = SessionFixture::with_storage(storage);
    assert_eq!(fixture.session.bootstrap().await, SessionPhase::Anonymous);
}

#[tokio::test]
async fn test_bootstrap_restores_stored_session() {
    let storage = Arc::new(MemoryStorage::with_items([(
        SESSION_STORAGE_KEY,
        r#"{"token":"abc","user":{"email":"admin@mobilehub.com"}}"#,
    )]));
    let fixture = SessionFixture::with_storage(storage);
    assert_eq!(fixture.session.bootstrap().await, SessionPhase::Authenticated);
    assert_eq!(fixture.session.bearer_token().await.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;

    fixture
        .storage
        .set_item(SESSION_STORAGE_KEY, r#"{"token":"late","user":null}"#)
        .unwrap();
    assert_eq!(fixture.session.bootstrap().await, SessionPhase::Anonymous);
    assert_eq!(fixture.session.bearer_token().await, None);
}

#[tokio::test]
async fn test_login_before_bootstrap_is_rejected() {
    let fixture = SessionFixture::new();
    let err = fixture.session.login("t", None).await.unwrap_err();
    assert!(matches!(err, AdminError::InvalidTransition(_)));
    assert_eq!(fixture.raw_stored(), None);

    let err = fixture.session.logout().await.unwrap_err();
    assert!(matches!(err, AdminError::InvalidTransition(_)));
}

#[tokio::test]
async fn test_login_persists_session() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;

    let user = AuthUser::with_email("admin@mobilehub.com");
    fixture
        .session
        .login("jwt-1", Some(user.clone()))
        .await
        .unwrap();
    assert!(fixture.session.is_authenticated().await);

    let reopened = fixture.reopen();
    assert_eq!(reopened.session.bootstrap().await, SessionPhase::Authenticated);
    let restored = reopened.session.snapshot().await;
    assert_eq!(restored.token.as_deref(), Some("jwt-1"));
    assert_eq!(restored.user, Some(user));
}

#[tokio::test]
async fn test_relogin_overwrites() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;
    fixture.session.login("first", None).await.unwrap();
    fixture
        .session
        .login("second", Some(AuthUser::with_email("b@shop.vn")))
        .await
        .unwrap();

    assert_eq!(
        fixture.raw_stored(),
        Some(json!({"token": "second", "user": {"email": "b@shop.vn"}}))
    );
}

#[tokio::test]
async fn test_logout_clears_even_when_remote_fails() {
    for remote_fails in [false, true] {
        let fixture = SessionFixture::new();
        fixture.auth.fail_logout.store(remote_fails, Ordering::SeqCst);
        fixture.session.bootstrap().await;
        fixture.session.login("jwt-9", None).await.unwrap();

        fixture.session.logout().await.unwrap();

        assert!(!fixture.session.is_authenticated().await);
        assert_eq!(fixture.auth.logout_tokens.lock().unwrap().clone(), vec!["jwt-9"]);
        assert_eq!(fixture.raw_stored(), Some(json!({"token": null, "user": null})));
        assert_eq!(fixture.reopen().session.bootstrap().await, SessionPhase::Anonymous);
    }
}

#[tokio::test]
async fn test_login_during_pending_logout_is_kept() {
    let fixture = SessionFixture::new();
    fixture.auth.hold_logout.store(true, Ordering::SeqCst);
    fixture.session.bootstrap().await;
    fixture.session.login("old", None).await.unwrap();

    let session = fixture.session.clone();
    let logout = tokio::spawn(async move { session.logout().await });
    fixture.auth.logout_started.notified().await;

    fixture
        .session
        .login("new", Some(AuthUser::with_email("c@shop.vn")))
        .await
        .unwrap();
    fixture.auth.logout_release.notify_one();
    logout.await.unwrap().unwrap();

    assert_eq!(fixture.auth.logout_tokens.lock().unwrap().clone(), vec!["old"]);
    assert_eq!(fixture.session.bearer_token().await.as_deref(), Some("new"));
    assert_eq!(
        fixture.raw_stored(),
        Some(json!({"token": "new", "user": {"email": "c@shop.vn"}}))
    );
}

#[tokio::test]
async fn test_logout_while_anonymous_skips_remote() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;
    fixture.session.logout().await.unwrap();
    assert!(fixture.auth.logout_tokens.lock().unwrap().is_empty());
    assert_eq!(fixture.session.phase().await, SessionPhase::Anonymous);
}

#[tokio::test]
async fn test_guard_waits_for_bootstrap_then_redirects() {
    let fixture = SessionFixture::new();
    let guard = RouteGuard::new(fixture.session.clone());

    assert_eq!(guard.check(&Route::Applications).await, RouteDecision::Loading);
    assert_eq!(fixture.session.take_redirect(), None);

    fixture.session.bootstrap().await;
    let (route, decision) = guard.navigate("/applications").await;
    assert_eq!(route, Route::Applications);
    assert_eq!(
        decision,
        RouteDecision::Redirect {
            to: Route::Login,
            from: Route::Applications,
        }
    );

    let login = LoginPage::new(fixture.auth.clone(), fixture.session.clone());
    let next = login.submit("admin@mobilehub.com", PASSWORD).await.unwrap();
    assert_eq!(next, Route::Applications);
    assert!(guard.check(&Route::Applications).await.is_admit());
    assert!(!login.is_submitting());
}

#[tokio::test]
async fn test_login_without_redirect_goes_home() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;
    let login = LoginPage::new(fixture.auth.clone(), fixture.session.clone());

    let next = login.submit("admin@mobilehub.com", PASSWORD).await.unwrap();
    assert_eq!(next, Route::Dashboard);
    assert_eq!(
        fixture.session.bearer_token().await.as_deref(),
        Some("token-for-admin@mobilehub.com")
    );
}

#[tokio::test]
async fn test_failed_login_shows_server_message() {
    let fixture = SessionFixture::new();
    fixture.session.bootstrap().await;
    let login = LoginPage::new(fixture.auth.clone(), fixture.session.clone());

    assert!(login.submit("admin@mobilehub.com", "wrong").await.is_err());
    assert_eq!(login.error().as_deref(), Some("Invalid email or password"));
    assert!(!fixture.session.is_authenticated().await);
    assert!(!login.is_submitting());
}
