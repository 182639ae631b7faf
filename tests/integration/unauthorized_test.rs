//! Integration tests for the global 401 handling.

mod helpers;

use vertdrop_core::ErrorKind;
use vertdrop_core::events::SessionEvent;
use vertdrop_entity::LoginCredentials;

#[tokio::test]
async fn test_valid_token_reaches_backend() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();

    let parcels: serde_json::Value = app.api.get_json("/parcels").await.unwrap();
    assert_eq!(parcels.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_401_clears_session_and_returns_to_login() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();
    let mut nav = app.navigator();
    nav.navigate("/admin/stats");
    assert_eq!(nav.location(), "/admin/stats");

    app.backend.revoke("tok-admin");
    let err = app
        .api
        .get_json::<serde_json::Value>("/parcels")
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert!(!app.store.is_authenticated());
    assert!(app.store.snapshot().identity().is_none());
    assert!(!app.slot_path().exists());

    let outcome = nav.process_events().unwrap();
    assert_eq!(outcome.path(), "/login");
    assert_eq!(nav.location(), "/login");
}

#[tokio::test]
async fn test_401_is_announced_once() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("client@vertdrop.ma", "client123"))
        .await
        .unwrap();
    let mut events = app.events.subscribe();

    app.backend.revoke("tok-client");
    let _ = app.api.get_json::<serde_json::Value>("/parcels").await;

    let event = events.try_recv().unwrap();
    assert_eq!(
        event.payload,
        SessionEvent::Unauthorized {
            request_path: "/parcels".to_string()
        }
    );
    assert_eq!(event.actor_id, Some(4));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_request_without_session_is_rejected() {
    let app = helpers::TestApp::new().await;

    let err = app
        .api
        .get_json::<serde_json::Value>("/parcels")
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert!(!app.store.is_authenticated());
}
