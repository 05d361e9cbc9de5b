//! Session controller.
//!
//! Owns the in-memory [`Session`] and drives its lifecycle:
//!
//! ```text
//! Bootstrapping ──bootstrap()──▶ Authenticated ⇄ Anonymous
//!                         └────▶ Anonymous
//! ```
//!
//! Every transition after bootstrap writes the full session to the
//! [`SessionStore`]. Store writes are best-effort: a failure is logged and
//! the in-memory transition stands.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use installment_core::auth::AuthRepository;
use installment_core::error::{AdminError, Result};
use installment_core::route::Route;
use installment_core::session::{
    AuthUser, Session, SessionPhase, SessionStore, StoredSession, TokenSource,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

pub struct SessionController {
    session: RwLock<Session>,
    store: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthRepository>,
    /// Route the operator was sent away from, for the post-login return.
    redirect: Mutex<Option<Route>>,
}

impl SessionController {
    pub fn new(store: Arc<dyn SessionStore>, auth: Arc<dyn AuthRepository>) -> Self {
        Self {
            session: RwLock::new(Session::new()),
            store,
            auth,
            redirect: Mutex::new(None),
        }
    }

    /// Reads the persisted session once. Later calls return the current
    /// phase without touching the store.
    pub async fn bootstrap(&self) -> SessionPhase {
        let mut session = self.session.write().await;
        if session.bootstrapped {
            return session.phase();
        }

        *session = Session::from_stored(self.store.load());
        let phase = session.phase();
        info!("[Session] Bootstrapped as {:?}", phase);
        phase
    }

    /// Stores a fresh token and profile. Re-login overwrites the previous
    /// session.
    pub async fn login(&self, token: impl Into<String>, user: Option<AuthUser>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(AdminError::validation("login requires a non-empty token"));
        }

        let mut session = self.session.write().await;
        if !session.bootstrapped {
            return Err(AdminError::invalid_transition(
                "login before the session was bootstrapped",
            ));
        }

        session.token = Some(token);
        session.user = user;
        self.persist(&session.to_stored());
        info!(
            "[Session] Logged in as {}",
            session.user.as_ref().map_or("Admin", |u| u.display_name())
        );
        Ok(())
    }

    /// Ends the session.
    ///
    /// The remote logout is called with the current token before it is
    /// cleared; its failure is logged and ignored. An anonymous session is
    /// cleared locally without a network call. A login that lands while the
    /// remote call is pending is kept.
    pub async fn logout(&self) -> Result<()> {
        let token = {
            let session = self.session.read().await;
            if !session.bootstrapped {
                return Err(AdminError::invalid_transition(
                    "logout before the session was bootstrapped",
                ));
            }
            session.token.clone().filter(|t| !t.is_empty())
        };

        match &token {
            Some(token) => {
                if let Err(e) = self.auth.logout(token).await {
                    warn!("[Session] Remote logout failed, clearing locally: {}", e);
                }
            }
            None => debug!("[Session] Logout while anonymous, no remote call"),
        }

        let mut session = self.session.write().await;
        if token.is_some() && session.token != token {
            info!("[Session] Signed in again during logout, keeping the new session");
            return Ok(());
        }
        session.token = None;
        session.user = None;
        self.persist(&StoredSession::anonymous());
        info!("[Session] Logged out");
        Ok(())
    }

    pub async fn snapshot(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.session.read().await.phase()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_authenticated()
    }

    pub async fn user(&self) -> Option<AuthUser> {
        self.session.read().await.user.clone()
    }

    /// Remembers where the operator wanted to go before being redirected.
    pub fn remember_redirect(&self, route: Route) {
        debug!("[Session] Remembering {} for after login", route);
        *self.redirect.lock().unwrap_or_else(PoisonError::into_inner) = Some(route);
    }

    /// Takes the remembered route, leaving none behind.
    pub fn take_redirect(&self) -> Option<Route> {
        self.redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn persist(&self, stored: &StoredSession) {
        if let Err(e) = self.store.save(stored) {
            warn!("[Session] Failed to persist session: {}", e);
        }
    }
}

#[async_trait]
impl TokenSource for SessionController {
    async fn bearer_token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }
}
