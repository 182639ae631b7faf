//! Wiring of the session stack for one CLI invocation.

use std::sync::Arc;

use vertdrop_auth::{
    FileCredentialStore, IdentityResolver, Navigator, RouteTable, Session, SessionStore,
};
use vertdrop_core::AppResult;
use vertdrop_core::config::AppConfig;
use vertdrop_core::events::EventBus;
use vertdrop_http::{ApiClient, HttpAuthBackend};

/// Everything a command needs, built once from the configuration.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub events: EventBus,
    pub store: SessionStore,
    pub api: ApiClient,
    pub resolver: IdentityResolver,
}

impl AppContext {
    /// Build the context. No network or disk access happens here.
    pub fn build(config: AppConfig) -> AppResult<Self> {
        let slot = FileCredentialStore::new(config.session.slot_path());
        let store = SessionStore::new(Arc::new(slot));
        let events = EventBus::new(config.events.capacity);

        let api = ApiClient::new(&config.api, store.clone(), events.clone())?;
        let backend = HttpAuthBackend::new(api.clone(), &config.api);
        let resolver = IdentityResolver::new(Arc::new(backend), store.clone(), events.clone())
            .with_expiry_leeway(config.session.expiry_leeway_seconds);

        Ok(Self {
            config,
            events,
            store,
            api,
            resolver,
        })
    }

    /// A navigator over the dashboard routes, subscribed to this context's
    /// events.
    pub fn navigator(&self) -> Navigator {
        Navigator::new(RouteTable::dashboard(), self.store.clone(), &self.events)
    }

    /// Re-establish the session persisted by a previous run.
    pub async fn restore(&self) -> AppResult<Option<Session>> {
        self.resolver.restore().await
    }
}
