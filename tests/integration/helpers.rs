//! Shared test helpers for integration tests.
//!
//! Spins up an in-process mock of the VertDrop backend on an ephemeral
//! port and wires the real client stack against it.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

use vertdrop_auth::{FileCredentialStore, IdentityResolver, Navigator, RouteTable, SessionStore};
use vertdrop_core::config::AppConfig;
use vertdrop_core::events::EventBus;
use vertdrop_http::{ApiClient, HttpAuthBackend};

/// Account known to the mock backend
#[derive(Debug, Clone)]
pub struct MockAccount {
    pub password: String,
    pub token: String,
    pub identity: Value,
    /// Embedded `user` sent with the login response instead of `identity`
    pub login_user: Option<Value>,
}

/// Mutable state behind the mock backend
#[derive(Debug, Default)]
pub struct MockState {
    accounts: Mutex<HashMap<String, MockAccount>>,
    revoked: Mutex<HashSet<String>>,
    pub login_calls: AtomicUsize,
    pub identity_calls: AtomicUsize,
    pub fail_identity: AtomicBool,
    next_id: AtomicUsize,
}

impl MockState {
    fn seeded() -> Self {
        let state = Self {
            next_id: AtomicUsize::new(100),
            ..Self::default()
        };
        state.add(
            "admin@vertdrop.ma",
            "admin123",
            "tok-admin",
            json!({
                "id": 1,
                "email": "admin@vertdrop.ma",
                "nom": "Idrissi",
                "prenom": "Samir",
                "role": "ROLE_ADMIN"
            }),
        );
        state.add(
            "manager@vertdrop.ma",
            "manager123",
            "tok-manager",
            json!({
                "id": 2,
                "email": "manager@vertdrop.ma",
                "nom": "Tazi",
                "prenom": "Leila",
                "role": "ROLE_MANAGER"
            }),
        );
        state.add(
            "livreur@vertdrop.ma",
            "livreur123",
            "tok-livreur",
            json!({
                "id": 3,
                "username": "livreur",
                "firstName": "Omar",
                "lastName": "Fassi",
                "roles": ["ROLE_LIVREUR"]
            }),
        );
        state.add(
            "client@vertdrop.ma",
            "client123",
            "tok-client",
            json!({
                "id": 4,
                "email": "client@vertdrop.ma",
                "nom": "Berrada",
                "prenom": "Sara",
                "role": "CLIENT",
                "telephone": "0612345678"
            }),
        );
        state.add(
            "ops@vertdrop.ma",
            "ops12345",
            "tok-ops",
            json!({
                "id": 5,
                "email": "ops@vertdrop.ma",
                "role": { "name": "ROLE_ADMIN" }
            }),
        );
        state.accounts_mut("ops@vertdrop.ma", |account| {
            account.login_user = Some(json!({ "id": "5", "role": ["ADMIN"] }));
        });
        state
    }

    fn add(&self, username: &str, password: &str, token: &str, identity: Value) {
        self.accounts.lock().unwrap().insert(
            username.to_string(),
            MockAccount {
                password: password.to_string(),
                token: token.to_string(),
                identity,
                login_user: None,
            },
        );
    }

    fn accounts_mut(&self, username: &str, update: impl FnOnce(&mut MockAccount)) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(username) {
            update(account);
        }
    }

    /// Make the backend reject `token` from now on
    pub fn revoke(&self, token: &str) {
        self.revoked.lock().unwrap().insert(token.to_string());
    }

    fn identity_for(&self, token: &str) -> Option<Value> {
        if self.revoked.lock().unwrap().contains(token) {
            return None;
        }
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.token == token)
            .map(|a| a.identity.clone())
    }
}

type Shared = Arc<MockState>;

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn unauthorized(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "message": message })))
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    state.login_calls.fetch_add(1, Ordering::SeqCst);
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let account = state.accounts.lock().unwrap().get(username).cloned();
    match account {
        Some(a) if a.password == password => (
            StatusCode::OK,
            Json(json!({ "token": a.token, "user": a.login_user.unwrap_or(a.identity) })),
        ),
        _ => unauthorized("Bad credentials"),
    }
}

async fn register(
    State(state): State<Shared>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    if state.accounts.lock().unwrap().contains_key(&email) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email déjà utilisé" })),
        );
    }

    let id = state.next_id.fetch_add(1, Ordering::SeqCst);
    let token = format!("tok-new-{id}");
    state.add(
        &email,
        body["password"].as_str().unwrap_or_default(),
        &token,
        json!({
            "id": id,
            "email": email,
            "nom": body["nom"],
            "prenom": body["prenom"],
            "telephone": body["telephone"],
            "role": body["role"],
        }),
    );
    (StatusCode::OK, Json(json!({ "accessToken": token })))
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    state.identity_calls.fetch_add(1, Ordering::SeqCst);
    if state.fail_identity.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "identity service down" })),
        );
    }
    match bearer(&headers).and_then(|t| state.identity_for(&t)) {
        Some(identity) => (StatusCode::OK, Json(identity)),
        None => unauthorized("Token invalid or expired"),
    }
}

async fn parcels(State(state): State<Shared>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    match bearer(&headers).and_then(|t| state.identity_for(&t)) {
        Some(_) => (
            StatusCode::OK,
            Json(json!([
                { "id": 10, "trackingNumber": "VD-0010", "statut": "EN_TRANSIT" },
                { "id": 11, "trackingNumber": "VD-0011", "statut": "LIVRE" }
            ])),
        ),
        None => unauthorized("Token invalid or expired"),
    }
}

/// Start the mock backend and return its address
pub async fn spawn_backend(state: Shared) -> SocketAddr {
    let router = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/me", get(me))
        .route("/api/parcels", get(parcels))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock backend failed");
    });

    addr
}

/// The client stack wired against the mock backend
pub struct TestApp {
    /// Mock backend state
    pub backend: Shared,
    /// Effective configuration
    pub config: AppConfig,
    /// Session event bus
    pub events: EventBus,
    /// Session store
    pub store: SessionStore,
    /// API client with the 401 hook
    pub api: ApiClient,
    /// Identity resolver
    pub resolver: IdentityResolver,
    /// Owns the credential directory
    _dir: Arc<tempfile::TempDir>,
}

impl TestApp {
    /// Start a backend and build a fresh client stack
    pub async fn new() -> Self {
        let backend: Shared = Arc::new(MockState::seeded());
        let addr = spawn_backend(backend.clone()).await;
        let dir = Arc::new(tempfile::tempdir().expect("Failed to create temp dir"));

        let mut config = AppConfig::default();
        config.api.base_url = format!("http://{addr}/api");
        config.api.timeout_seconds = 5;
        config.session.storage_dir = dir.path().to_string_lossy().into_owned();

        Self::wire(backend, config, dir)
    }

    /// A second process against the same backend and credential slot
    pub fn restart(&self) -> Self {
        Self::wire(self.backend.clone(), self.config.clone(), self._dir.clone())
    }

    fn wire(backend: Shared, config: AppConfig, dir: Arc<tempfile::TempDir>) -> Self {
        let slot = FileCredentialStore::new(config.session.slot_path());
        let store = SessionStore::new(Arc::new(slot));
        let events = EventBus::new(config.events.capacity);
        let api = ApiClient::new(&config.api, store.clone(), events.clone())
            .expect("Failed to build API client");
        let auth = HttpAuthBackend::new(api.clone(), &config.api);
        let resolver = IdentityResolver::new(Arc::new(auth), store.clone(), events.clone())
            .with_expiry_leeway(config.session.expiry_leeway_seconds);

        Self {
            backend,
            config,
            events,
            store,
            api,
            resolver,
            _dir: dir,
        }
    }

    /// Navigator over the dashboard routes
    pub fn navigator(&self) -> Navigator {
        Navigator::new(RouteTable::dashboard(), self.store.clone(), &self.events)
    }

    /// Path of the persisted credential
    pub fn slot_path(&self) -> PathBuf {
        self.config.session.slot_path()
    }

    /// Contents of the persisted credential, if any
    pub fn persisted(&self) -> Option<String> {
        std::fs::read_to_string(self.slot_path()).ok()
    }
}
