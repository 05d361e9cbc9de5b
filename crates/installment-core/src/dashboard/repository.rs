//! Dashboard repository trait.

use async_trait::async_trait;

use super::model::DashboardOverview;
use crate::error::Result;

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    /// `GET /dashboard/overview`.
    async fn overview(&self) -> Result<DashboardOverview>;
}
