//! Dashboard domain module.

mod model;
pub mod repository;

pub use model::{DashboardOverview, PendingSummary, RevenuePoint};
pub use repository::DashboardRepository;
