//! Application repository trait.

use async_trait::async_trait;

use super::model::{ApplicationStatus, LoanApplication};
use crate::error::Result;
use crate::query::ListFilters;

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Lists applications; empty filters are not sent.
    async fn list(&self, filters: &ListFilters) -> Result<Vec<LoanApplication>>;

    /// `PUT /applications/{id}/status`. The server decides whether the
    /// transition is legal; the response body is not used.
    async fn update_status(&self, id: i64, status: ApplicationStatus) -> Result<()>;
}
