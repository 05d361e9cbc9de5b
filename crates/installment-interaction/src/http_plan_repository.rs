//! Plan endpoints over HTTP.

use async_trait::async_trait;
use installment_core::error::Result;
use installment_core::plan::{Plan, PlanForm, PlanRepository};

use crate::authorized_gateway::AuthorizedGateway;

#[derive(Clone)]
pub struct HttpPlanRepository {
    gateway: AuthorizedGateway,
}

impl HttpPlanRepository {
    pub fn new(gateway: AuthorizedGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl PlanRepository for HttpPlanRepository {
    async fn list(&self) -> Result<Vec<Plan>> {
        self.gateway.get("/plans", &[]).await
    }

    async fn create(&self, form: &PlanForm) -> Result<Plan> {
        self.gateway.post("/plans", form).await
    }

    async fn update(&self, id: i64, form: &PlanForm) -> Result<Plan> {
        self.gateway.put(&format!("/plans/{}", id), form).await
    }

    async fn deactivate(&self, id: i64) -> Result<Plan> {
        self.gateway.delete(&format!("/plans/{}", id)).await
    }
}
