//! Compass Server - session-gated company CRUD over HTTP
//!
//! Wires the core pieces into a web application:
//! - an admission middleware that bounds concurrent demo sessions
//! - a cookie-keyed session table with inactivity expiry
//! - CRUD page handlers over whichever [`CompanyStore`] the startup mode
//!   selected: per-session in-memory stores in demo mode, a shared durable
//!   store otherwise

#![warn(unreachable_pub)]

pub mod admission;
pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod session;

pub use admission::COOKIE_NAME;
pub use config::ServerConfig;
pub use error::PageError;
pub use session::{SessionId, SessionManager};

use axum::routing::{get, post};
use axum::{middleware, Router};
use compass_core::{AdmissionPolicy, CompanyStore, Mode, SessionRegistry};
use std::sync::Arc;

/// Shared application state: the mode-selected backend wiring plus the
/// session machinery. Cheap to clone; everything inside is shared.
#[derive(Clone)]
pub struct AppState {
    mode: Mode,
    policy: AdmissionPolicy,
    registry: Arc<SessionRegistry>,
    sessions: Arc<SessionManager>,
    durable: Option<Arc<dyn CompanyStore>>,
}

impl AppState {
    /// Demo-mode wiring: admission gate plus per-session ephemeral stores
    #[must_use]
    pub fn demo(config: &ServerConfig) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&registry),
            config.session_ttl,
        ));
        Self {
            mode: Mode::Demo,
            policy: AdmissionPolicy::with_capacity(config.max_sessions),
            registry,
            sessions,
            durable: None,
        }
    }

    /// Normal-mode wiring: one shared durable store, no gating
    #[must_use]
    pub fn local(config: &ServerConfig, store: Arc<dyn CompanyStore>) -> Self {
        let registry = Arc::new(SessionRegistry::new());
        let sessions = Arc::new(SessionManager::new(
            Arc::clone(&registry),
            config.session_ttl,
        ));
        Self {
            mode: Mode::Local,
            policy: AdmissionPolicy::with_capacity(config.max_sessions),
            registry,
            sessions,
            durable: Some(store),
        }
    }

    /// Active operating mode
    #[inline]
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The admission policy consulted by the gate
    #[inline]
    #[must_use]
    pub fn policy(&self) -> AdmissionPolicy {
        self.policy
    }

    /// The shared active-session counter
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// The session table
    #[inline]
    #[must_use]
    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }

    /// Resolve the company store serving this request's session.
    ///
    /// Local mode always answers with the shared durable store; demo mode
    /// answers with the store owned by the session.
    ///
    /// # Errors
    /// - `PageError::Internal` if the session vanished between admission
    ///   and handling (expiry raced the request)
    pub fn store_for(&self, session: SessionId) -> Result<Arc<dyn CompanyStore>, PageError> {
        match &self.durable {
            Some(store) => Ok(Arc::clone(store)),
            None => self
                .sessions
                .ephemeral_store(session)
                .map(|store| store as Arc<dyn CompanyStore>)
                .ok_or_else(|| {
                    PageError::Internal(format!("session {session} expired while in flight"))
                }),
        }
    }
}

/// Build the application router: CRUD pages behind the admission gate
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::list_companies))
        .route("/add", get(routes::add_form))
        .route("/edit/:id", get(routes::edit_form))
        .route("/save", post(routes::save_company))
        .route("/delete/:id", get(routes::delete_company))
        .route("/about", get(routes::about_page))
        .route("/contact", get(routes::contact_page))
        .layer(middleware::from_fn_with_state(state.clone(), admission::gate))
        .with_state(state)
}
