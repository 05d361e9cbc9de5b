//! Contract endpoints over HTTP.

use async_trait::async_trait;
use installment_core::contract::{Contract, ContractRepository};
use installment_core::error::Result;
use installment_core::query::ListFilters;
use serde_json::{Map, Value};

use crate::authorized_gateway::AuthorizedGateway;

#[derive(Clone)]
pub struct HttpContractRepository {
    gateway: AuthorizedGateway,
}

impl HttpContractRepository {
    pub fn new(gateway: AuthorizedGateway) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl ContractRepository for HttpContractRepository {
    async fn list(&self, filters: &ListFilters) -> Result<Vec<Contract>> {
        let query = filters.to_query();
        self.gateway.get("/contracts", &query.pairs()).await
    }

    async fn detail(&self, id: i64) -> Result<Map<String, Value>> {
        self.gateway.get(&format!("/contracts/{}", id), &[]).await
    }
}
