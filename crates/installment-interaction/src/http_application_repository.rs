//! Loan application endpoints over HTTP.

use async_trait::async_trait;
use installment_core::application::{
    ApplicationRepository, ApplicationStatus, LoanApplication, StatusUpdate,
};
use installment_core::error::Result;
use installment_core::query::ListFilters;

use crate::authorized_gateway::AuthorizedGateway;

#[derive(Clone)]
pub struct HttpApplicationRepository {
    gateway: AuthorizedGateway,
}

impl HttpApplicationRepository {
    pub fn new(gateway: AuthorizedGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ApplicationRepository for HttpApplicationRepository {
    async fn list(&self, filters: &ListFilters) -> Result<Vec<LoanApplication>> {
        let query = filters.to_query();
        self.gateway.get("/applications", &query.pairs()).await
    }

    async fn update_status(&self, id: i64, status: ApplicationStatus) -> Result<()> {
        self.gateway
            .put_ignoring_body(
                &format!("/applications/{}/status", id),
                &StatusUpdate { status },
            )
            .await
    }
}
