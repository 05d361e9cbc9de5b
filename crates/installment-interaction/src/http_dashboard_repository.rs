//! Dashboard endpoint over HTTP.

use async_trait::async_trait;
use installment_core::dashboard::{DashboardOverview, DashboardRepository};
use installment_core::error::Result;

use crate::authorized_gateway::AuthorizedGateway;

#[derive(Clone)]
pub struct HttpDashboardRepository {
    gateway: AuthorizedGateway,
}

impl HttpDashboardRepository {
    pub fn new(gateway: AuthorizedGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl DashboardRepository for HttpDashboardRepository {
    async fn overview(&self) -> Result<DashboardOverview> {
        self.gateway.get("/dashboard/overview", &[]).await
    }
}
