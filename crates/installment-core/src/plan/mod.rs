//! Installment plan domain module.
//!
//! - `model`: `Plan`, the editable `PlanForm`, partner catalog, tenor quotes
//! - `repository`: `PlanRepository` port

mod model;
pub mod repository;

pub use model::{PARTNERS, Partner, Plan, PlanForm, TenorQuote, parse_tenors};
pub use repository::PlanRepository;
