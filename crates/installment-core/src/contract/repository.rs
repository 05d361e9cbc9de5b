//! Contract repository trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

use super::model::Contract;
use crate::error::Result;
use crate::query::ListFilters;

#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// Lists contracts; empty filters are not sent.
    async fn list(&self, filters: &ListFilters) -> Result<Vec<Contract>>;

    /// The raw detail record of `GET /contracts/{id}`.
    ///
    /// It is kept untyped because it is overlaid on a list row before being
    /// decoded; see [`super::merge_detail`].
    async fn detail(&self, id: i64) -> Result<Map<String, Value>>;
}
