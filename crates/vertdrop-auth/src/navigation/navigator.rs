//! Location tracking and guarded navigation.

use serde::Serialize;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::{debug, info, warn};

use vertdrop_core::events::{DomainEvent, EventBus, SessionEvent};

use crate::guard::{AccessDecision, AccessGuard};
use crate::session::{SessionStatus, SessionStore};

use super::menu::MenuItem;
use super::routes::{LOGIN_PATH, RouteTable, normalize_path};

/// Redirects are followed at most this many times per navigation.
const MAX_HOPS: usize = 4;

/// Why a navigation ended somewhere other than where it was aimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// No session.
    NotAuthenticated,
    /// The current role is not admitted to the route.
    RoleNotAdmitted,
    /// No route covers the path.
    UnknownRoute,
    /// The login view was requested with a session already in place.
    AlreadyAuthenticated,
    /// The backend rejected the token or the user logged out.
    SessionEnded,
}

/// Result of one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The view at `path` is shown.
    Rendered { path: String },
    /// The session is still resolving; `path` is shown once it settles.
    Loading { path: String },
    /// The navigation ended at `to`.
    Redirected { to: String, reason: RedirectReason },
}

impl NavigationOutcome {
    /// Path the navigator ended at.
    pub fn path(&self) -> &str {
        match self {
            Self::Rendered { path } | Self::Loading { path } => path,
            Self::Redirected { to, .. } => to,
        }
    }
}

enum Step {
    Render,
    Loading,
    Redirect(String, RedirectReason),
}

/// Tracks the current location and runs every navigation through the
/// access guard against a fresh session snapshot.
#[derive(Debug)]
pub struct Navigator {
    routes: RouteTable,
    store: SessionStore,
    events: broadcast::Receiver<DomainEvent>,
    location: String,
    return_to: Option<String>,
}

impl Navigator {
    /// Creates a navigator at the login view, listening on `events`.
    pub fn new(routes: RouteTable, store: SessionStore, events: &EventBus) -> Self {
        Self {
            routes,
            store,
            events: events.subscribe(),
            location: LOGIN_PATH.to_string(),
            return_to: None,
        }
    }

    /// Current location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Path remembered by the last login redirect.
    pub fn return_to(&self) -> Option<&str> {
        self.return_to.as_deref()
    }

    /// Navigate to `path`, following redirects.
    pub fn navigate(&mut self, path: &str) -> NavigationOutcome {
        let requested = normalize_path(path);
        let mut current = requested.clone();
        let mut first_reason = None;

        for _ in 0..MAX_HOPS {
            match self.evaluate(&current) {
                Step::Render => break,
                Step::Loading => {
                    self.location = current.clone();
                    return NavigationOutcome::Loading { path: current };
                }
                Step::Redirect(to, reason) => {
                    debug!(from = %current, to = %to, ?reason, "Redirecting");
                    match reason {
                        RedirectReason::NotAuthenticated => {
                            self.return_to = Some(current.clone());
                        }
                        RedirectReason::AlreadyAuthenticated => {
                            self.return_to = None;
                        }
                        _ => {}
                    }
                    first_reason.get_or_insert(reason);
                    current = to;
                }
            }
        }

        self.location = current.clone();
        match first_reason {
            Some(reason) => NavigationOutcome::Redirected {
                to: current,
                reason,
            },
            None => NavigationOutcome::Rendered { path: current },
        }
    }

    /// Land after a successful login: the remembered origin unless it was
    /// the root, otherwise the role's home view.
    pub fn after_login(&mut self) -> NavigationOutcome {
        let target = self.landing();
        self.return_to = None;
        info!(target = %target, "Landing after login");
        self.navigate(&target)
    }

    /// Sidebar entries for the current role.
    pub fn menu(&self) -> Vec<MenuItem> {
        let session = self.store.snapshot();
        if !session.is_authenticated() {
            return Vec::new();
        }
        MenuItem::for_role(session.role())
    }

    /// Drain pending session events, returning to login when one of them
    /// ends the session.
    ///
    /// Returns the resulting navigation, if any event forced one.
    pub fn process_events(&mut self) -> Option<NavigationOutcome> {
        let mut outcome = None;
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(redirect) = self.handle(&event.payload) {
                        outcome = Some(redirect);
                    }
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Navigator missed session events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        outcome
    }

    fn handle(&mut self, event: &SessionEvent) -> Option<NavigationOutcome> {
        if event.requires_login() {
            info!(event = ?event, "Session rejected by backend, returning to login");
            if self.location != LOGIN_PATH {
                self.return_to = Some(self.location.clone());
            }
            return Some(self.force_login());
        }

        match event {
            SessionEvent::LoggedOut { .. } => {
                self.return_to = None;
                Some(self.force_login())
            }
            _ => None,
        }
    }

    fn force_login(&mut self) -> NavigationOutcome {
        self.location = LOGIN_PATH.to_string();
        NavigationOutcome::Redirected {
            to: LOGIN_PATH.to_string(),
            reason: RedirectReason::SessionEnded,
        }
    }

    fn landing(&self) -> String {
        match self.return_to.as_deref() {
            Some(origin) if origin != "/" && origin != LOGIN_PATH => origin.to_string(),
            _ => AccessGuard::default_landing(self.store.snapshot().role()).to_string(),
        }
    }

    fn evaluate(&self, path: &str) -> Step {
        let Some(rule) = self.routes.resolve(path) else {
            return Step::Redirect(LOGIN_PATH.to_string(), RedirectReason::UnknownRoute);
        };

        let session = self.store.snapshot();

        if rule.public {
            if path == LOGIN_PATH
                && session.status() == SessionStatus::Ready
                && session.is_authenticated()
            {
                return Step::Redirect(self.landing(), RedirectReason::AlreadyAuthenticated);
            }
            return Step::Render;
        }

        match AccessGuard::check(&session, path, rule) {
            AccessDecision::ShowLoading => Step::Loading,
            AccessDecision::RedirectToLogin { .. } => {
                Step::Redirect(LOGIN_PATH.to_string(), RedirectReason::NotAuthenticated)
            }
            AccessDecision::RedirectToDefault { to } => {
                Step::Redirect(to, RedirectReason::RoleNotAdmitted)
            }
            AccessDecision::Allow => Step::Render,
        }
    }
}
