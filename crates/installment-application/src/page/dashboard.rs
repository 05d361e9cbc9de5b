//! Dashboard page.

use std::sync::Arc;

use installment_core::dashboard::{DashboardOverview, DashboardRepository};
use installment_core::error::Result;
use installment_core::fetch::{FetchOptions, FetchState};
use installment_core::view::FixedViewport;

use super::PageState;

/// The overview figures. A failed refresh keeps the last overview shown.
pub struct DashboardPage {
    repo: Arc<dyn DashboardRepository>,
    state: PageState<Option<DashboardOverview>>,
}

impl DashboardPage {
    pub fn new(repo: Arc<dyn DashboardRepository>) -> Self {
        Self {
            repo,
            state: PageState::new("Dashboard", None),
        }
    }

    pub fn state(&self) -> &PageState<Option<DashboardOverview>> {
        &self.state
    }

    pub fn snapshot(&self) -> FetchState<Option<DashboardOverview>> {
        self.state.snapshot()
    }

    pub fn overview(&self) -> Option<DashboardOverview> {
        self.state.data()
    }

    pub async fn fetch(&self, options: FetchOptions) -> Result<bool> {
        let request = async { self.repo.overview().await.map(Some) };
        self.state.fetch_with(options, &FixedViewport, request).await
    }
}
