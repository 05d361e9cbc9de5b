//! Composition root.
//!
//! Builds the storage, gateway, session and page objects once and hands
//! them out by reference. The session controller is shared by `Arc`: it is
//! both the route guard's source of truth and the token source of every
//! resource accessor.

use std::sync::Arc;

use installment_core::application::ApplicationRepository;
use installment_core::auth::AuthRepository;
use installment_core::config::ConfigRoot;
use installment_core::contract::ContractRepository;
use installment_core::dashboard::DashboardRepository;
use installment_core::error::Result;
use installment_core::plan::PlanRepository;
use installment_core::session::{SessionStore, TokenSource};
use installment_core::storage::KeyValueStorage;
use installment_core::view::Viewport;
use installment_infrastructure::{
    AdminPaths, EnvColorScheme, LocalStorage, StorageSessionStore, StorageThemeStore,
};
use installment_interaction::{
    AuthorizedGateway, GatewayClient, HttpApplicationRepository, HttpAuthRepository,
    HttpContractRepository, HttpDashboardRepository, HttpPlanRepository,
};
use tracing::debug;

use crate::page::{ApplicationsPage, ContractsPage, DashboardPage, LoginPage, PlansPage};
use crate::route_guard::RouteGuard;
use crate::session_controller::SessionController;
use crate::theme_controller::ThemeController;

/// The resource accessors the pages talk to.
pub struct Repositories {
    pub plans: Arc<dyn PlanRepository>,
    pub applications: Arc<dyn ApplicationRepository>,
    pub contracts: Arc<dyn ContractRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
}

impl Repositories {
    /// HTTP accessors that read the bearer token from `tokens`.
    pub fn http(gateway: &GatewayClient, tokens: Arc<dyn TokenSource>) -> Self {
        let authorized = AuthorizedGateway::new(gateway.clone(), tokens);
        Self {
            plans: Arc::new(HttpPlanRepository::new(authorized.clone())),
            applications: Arc::new(HttpApplicationRepository::new(authorized.clone())),
            contracts: Arc::new(HttpContractRepository::new(authorized.clone())),
            dashboard: Arc::new(HttpDashboardRepository::new(authorized)),
        }
    }
}

pub struct AdminContext {
    pub session: Arc<SessionController>,
    pub guard: RouteGuard,
    pub theme: ThemeController,
    pub login: LoginPage,
    pub dashboard: DashboardPage,
    pub plans: PlansPage,
    pub applications: ApplicationsPage,
    pub contracts: ContractsPage,
}

impl AdminContext {
    /// Wires the file-backed stores under `paths` to the HTTP gateway
    /// described by `config`.
    pub fn from_config(
        paths: &AdminPaths,
        config: &ConfigRoot,
        viewport: Arc<dyn Viewport>,
    ) -> Result<Self> {
        debug!(
            "[Context] Storage at {}, gateway {}{}",
            paths.storage_dir().display(),
            config.gateway.base_url,
            config.gateway.api_prefix
        );

        let storage: Arc<dyn KeyValueStorage> = Arc::new(LocalStorage::new(paths.storage_dir()));
        let gateway = GatewayClient::new(&config.gateway)?;
        let auth: Arc<dyn AuthRepository> = Arc::new(HttpAuthRepository::new(gateway.clone()));
        let session_store: Arc<dyn SessionStore> =
            Arc::new(StorageSessionStore::new(storage.clone()));
        let session = Arc::new(SessionController::new(session_store, auth.clone()));
        let repositories = Repositories::http(&gateway, session.clone());
        let theme =
            ThemeController::new(Arc::new(StorageThemeStore::new(storage)), &EnvColorScheme);

        Ok(Self::assemble(session, auth, theme, repositories, viewport))
    }

    /// Wires pages around already-built collaborators.
    pub fn assemble(
        session: Arc<SessionController>,
        auth: Arc<dyn AuthRepository>,
        theme: ThemeController,
        repositories: Repositories,
        viewport: Arc<dyn Viewport>,
    ) -> Self {
        Self {
            guard: RouteGuard::new(session.clone()),
            login: LoginPage::new(auth, session.clone()),
            dashboard: DashboardPage::new(repositories.dashboard),
            plans: PlansPage::new(repositories.plans).with_viewport(viewport.clone()),
            applications: ApplicationsPage::new(repositories.applications)
                .with_viewport(viewport.clone()),
            contracts: ContractsPage::new(repositories.contracts).with_viewport(viewport),
            theme,
            session,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use installment_core::route::{Route, RouteDecision};
    use installment_core::session::SessionPhase;
    use installment_core::view::FixedViewport;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_fresh_directory_bootstraps_anonymous() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AdminPaths::with_root(temp_dir.path());
        let context =
            AdminContext::from_config(&paths, &ConfigRoot::default(), Arc::new(FixedViewport))
                .unwrap();
        assert_eq!(context.session.phase().await, SessionPhase::Bootstrapping);
        assert_eq!(context.session.bootstrap().await, SessionPhase::Anonymous);
        assert!(matches!(
            context.guard.check(&Route::Plans).await,
            RouteDecision::Redirect { .. }
        ));
    }
}
