//! Navigation routes and the guard decision.

use std::fmt;

use crate::session::Session;

/// The pages of the admin client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Plans,
    Applications,
    Contracts,
    /// Any path that matches no page. Carries the requested path.
    NotFound(String),
}

impl Route {
    pub const LOGIN_PATH: &'static str = "/login";

    /// Resolves a location path. Trailing slashes and a query string are
    /// ignored; unknown paths become [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let without_query = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = without_query.trim_end_matches('/');
        match trimmed {
            "" => Route::Dashboard,
            "/login" => Route::Login,
            "/plans" => Route::Plans,
            "/applications" => Route::Applications,
            "/contracts" => Route::Contracts,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Login => Self::LOGIN_PATH,
            Route::Dashboard => "/",
            Route::Plans => "/plans",
            Route::Applications => "/applications",
            Route::Contracts => "/contracts",
            Route::NotFound(path) => path,
        }
    }

    /// Public routes are admitted without consulting the session.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of asking the guard whether a route may be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The persisted session has not been read; render a placeholder.
    Loading,
    /// Send the operator to `to`, remembering `from` for after login.
    Redirect { to: Route, from: Route },
    Admit,
}

impl RouteDecision {
    pub fn is_admit(&self) -> bool {
        matches!(self, RouteDecision::Admit)
    }
}

/// Decides whether `route` may be rendered for `session`.
///
/// Public routes are always admitted. For protected routes the decision is
/// three-way: nothing is admitted or redirected before bootstrap completes,
/// and afterwards the operator is redirected iff not authenticated.
pub fn decide(session: &Session, route: &Route) -> RouteDecision {
    if !route.is_protected() {
        return RouteDecision::Admit;
    }
    if !session.bootstrapped {
        return RouteDecision::Loading;
    }
    if !session.is_authenticated() {
        return RouteDecision::Redirect {
            to: Route::Login,
            from: route.clone(),
        };
    }
    RouteDecision::Admit
}
