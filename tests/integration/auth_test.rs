//! Integration tests for login, registration, restore and logout.

mod helpers;

use std::sync::atomic::Ordering;

use vertdrop_auth::SessionStatus;
use vertdrop_core::ErrorKind;
use vertdrop_entity::{LoginCredentials, RegisterRequest, Role};

#[tokio::test]
async fn test_login_resolves_identity_separately() {
    let app = helpers::TestApp::new().await;

    let session = app
        .resolver
        .login(LoginCredentials::new("manager@vertdrop.ma", "manager123"))
        .await
        .unwrap();

    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.role(), Some(Role::Manager));
    assert_eq!(session.identity().unwrap().display_name, "Tazi Leila");
    assert_eq!(app.backend.identity_calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.persisted().as_deref(), Some("tok-manager"));
}

#[tokio::test]
async fn test_role_list_payload() {
    let app = helpers::TestApp::new().await;

    let session = app
        .resolver
        .login(LoginCredentials::new("livreur@vertdrop.ma", "livreur123"))
        .await
        .unwrap();

    let identity = session.identity().unwrap();
    assert_eq!(identity.role, Role::Livreur);
    assert_eq!(identity.display_name, "Fassi Omar");
    assert_eq!(identity.email, "livreur");
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = helpers::TestApp::new().await;
    let mut events = app.events.subscribe();

    let err = app
        .resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert!(!app.store.is_authenticated());
    assert!(app.persisted().is_none());
    assert_eq!(app.backend.identity_calls.load(Ordering::SeqCst), 0);

    while let Ok(event) = events.try_recv() {
        assert!(!event.payload.requires_login());
    }
}

#[tokio::test]
async fn test_failed_identity_lookup_persists_nothing() {
    let app = helpers::TestApp::new().await;
    app.backend.fail_identity.store(true, Ordering::SeqCst);

    let err = app
        .resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Server);
    let session = app.store.snapshot();
    assert!(!session.is_authenticated());
    assert!(session.identity().is_none());
    assert_eq!(session.status(), SessionStatus::Failed);
    assert!(app.persisted().is_none());
}

#[tokio::test]
async fn test_validation_happens_before_request() {
    let app = helpers::TestApp::new().await;

    let err = app
        .resolver
        .login(LoginCredentials::new("", "admin123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.backend.login_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_restore_from_persisted_token() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("client@vertdrop.ma", "client123"))
        .await
        .unwrap();

    let next_run = app.restart();
    assert!(!next_run.store.is_authenticated());

    let session = next_run.resolver.restore().await.unwrap().unwrap();
    assert_eq!(session.role(), Some(Role::Client));
    assert_eq!(
        session.identity().unwrap().phone.as_deref(),
        Some("0612345678")
    );
}

#[tokio::test]
async fn test_restore_with_revoked_token() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();
    app.backend.revoke("tok-admin");

    let next_run = app.restart();
    assert!(next_run.resolver.restore().await.unwrap().is_none());
    assert!(!next_run.store.is_authenticated());
    assert!(next_run.persisted().is_none());
}

#[tokio::test]
async fn test_register_then_session_ready() {
    let app = helpers::TestApp::new().await;

    let session = app
        .resolver
        .register(RegisterRequest {
            email: "youssef@vertdrop.ma".to_string(),
            password: "secret1".to_string(),
            nom: "Amrani".to_string(),
            prenom: "Youssef".to_string(),
            telephone: "0698765432".to_string(),
            role: Role::Livreur,
        })
        .await
        .unwrap();

    assert_eq!(session.role(), Some(Role::Livreur));
    assert_eq!(session.identity().unwrap().display_name, "Amrani Youssef");
    assert!(app.persisted().is_some());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = helpers::TestApp::new().await;

    let err = app
        .resolver
        .register(RegisterRequest {
            email: "admin@vertdrop.ma".to_string(),
            password: "secret1".to_string(),
            nom: "Dup".to_string(),
            prenom: "Licate".to_string(),
            telephone: String::new(),
            role: Role::Client,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(!app.store.is_authenticated());
}

#[tokio::test]
async fn test_logout_erases_slot() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();
    assert!(app.persisted().is_some());

    app.resolver.logout().await.unwrap();

    assert!(!app.store.is_authenticated());
    assert!(app.persisted().is_none());
}

#[tokio::test]
async fn test_unexpected_role_shape_defaults_to_client() {
    let app = helpers::TestApp::new().await;

    let session = app
        .resolver
        .login(LoginCredentials::new("ops@vertdrop.ma", "ops12345"))
        .await
        .unwrap();

    assert_eq!(session.status(), SessionStatus::Ready);
    assert_eq!(session.role(), Some(Role::Client));
    assert_eq!(session.identity().unwrap().id, 5);
    assert_eq!(app.persisted().as_deref(), Some("tok-ops"));
}

#[tokio::test]
async fn test_wrong_password_keeps_previous_token() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();

    let next_run = app.restart();
    let err = next_run
        .resolver
        .login(LoginCredentials::new("manager@vertdrop.ma", "wrong-password"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    assert_eq!(next_run.store.snapshot().status(), SessionStatus::Failed);
    assert_eq!(next_run.persisted().as_deref(), Some("tok-admin"));

    let session = app.restart().resolver.restore().await.unwrap().unwrap();
    assert_eq!(session.role(), Some(Role::Admin));
}
