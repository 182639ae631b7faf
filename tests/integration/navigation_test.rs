//! Integration tests for guarded navigation.

mod helpers;

use vertdrop_auth::{NavigationOutcome, RedirectReason};
use vertdrop_entity::LoginCredentials;

#[tokio::test]
async fn test_admin_returns_to_requested_page() {
    let app = helpers::TestApp::new().await;
    let mut nav = app.navigator();

    let outcome = nav.navigate("/admin/zones");
    assert_eq!(
        outcome,
        NavigationOutcome::Redirected {
            to: "/login".to_string(),
            reason: RedirectReason::NotAuthenticated,
        }
    );

    app.resolver
        .login(LoginCredentials::new("admin@vertdrop.ma", "admin123"))
        .await
        .unwrap();

    assert_eq!(
        nav.after_login(),
        NavigationOutcome::Rendered {
            path: "/admin/zones".to_string()
        }
    );
    assert_eq!(nav.location(), "/admin/zones");
}

#[tokio::test]
async fn test_client_redirected_from_admin_users() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("client@vertdrop.ma", "client123"))
        .await
        .unwrap();
    let mut nav = app.navigator();

    assert_eq!(
        nav.navigate("/admin/users"),
        NavigationOutcome::Redirected {
            to: "/client".to_string(),
            reason: RedirectReason::RoleNotAdmitted,
        }
    );
}

#[tokio::test]
async fn test_manager_shares_admin_views() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("manager@vertdrop.ma", "manager123"))
        .await
        .unwrap();
    let mut nav = app.navigator();

    for path in ["/admin", "/admin/users", "/admin/zones", "/admin/stats", "/admin/parcels"] {
        assert_eq!(
            nav.navigate(path),
            NavigationOutcome::Rendered {
                path: path.to_string()
            }
        );
    }
    assert_eq!(nav.navigate("/livreur").path(), "/admin");
}

#[tokio::test]
async fn test_default_landing_from_root() {
    let app = helpers::TestApp::new().await;
    let mut nav = app.navigator();
    nav.navigate("/");

    app.resolver
        .login(LoginCredentials::new("livreur@vertdrop.ma", "livreur123"))
        .await
        .unwrap();

    assert_eq!(nav.after_login().path(), "/livreur");
    let hrefs: Vec<_> = nav.menu().iter().map(|i| i.href).collect();
    assert_eq!(hrefs, vec!["/livreur"]);
}

#[tokio::test]
async fn test_logout_returns_to_login() {
    let app = helpers::TestApp::new().await;
    app.resolver
        .login(LoginCredentials::new("client@vertdrop.ma", "client123"))
        .await
        .unwrap();
    let mut nav = app.navigator();
    nav.navigate("/client");

    app.resolver.logout().await.unwrap();

    assert_eq!(nav.process_events().unwrap().path(), "/login");
    assert!(matches!(
        nav.navigate("/client"),
        NavigationOutcome::Redirected {
            reason: RedirectReason::NotAuthenticated,
            ..
        }
    ));
}
