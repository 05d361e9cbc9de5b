//! Plan repository trait.

use async_trait::async_trait;

use super::model::{Plan, PlanForm};
use crate::error::Result;

/// CRUD-style access to installment plans.
///
/// There is no hard delete: `deactivate` asks the server to flip the plan's
/// `active` flag and returns the updated plan.
#[async_trait]
pub trait PlanRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Plan>>;

    async fn create(&self, form: &PlanForm) -> Result<Plan>;

    async fn update(&self, id: i64, form: &PlanForm) -> Result<Plan>;

    async fn deactivate(&self, id: i64) -> Result<Plan>;
}
