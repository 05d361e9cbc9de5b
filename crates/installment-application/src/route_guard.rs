//! Route guard over the session controller.

use std::sync::Arc;

use installment_core::route::{Route, RouteDecision, decide};
use tracing::info;

use crate::session_controller::SessionController;

/// Admits or redirects navigation based on the current session.
///
/// A redirect remembers the requested route on the controller so the login
/// page can return there. Losing it is harmless; the fallback is `/`.
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<SessionController>,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionController>) -> Self {
        Self { session }
    }

    pub async fn check(&self, route: &Route) -> RouteDecision {
        let session = self.session.snapshot().await;
        let decision = decide(&session, route);
        if let RouteDecision::Redirect { to, from } = &decision {
            info!("[RouteGuard] {} requires login, redirecting to {}", from, to);
            self.session.remember_redirect(from.clone());
        }
        decision
    }

    /// Resolves `path` and checks the resulting route.
    pub async fn navigate(&self, path: &str) -> (Route, RouteDecision) {
        let route = Route::parse(path);
        let decision = self.check(&route).await;
        (route, decision)
    }
}
