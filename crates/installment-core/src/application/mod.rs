//! Loan application domain module.
//!
//! - `model`: `LoanApplication`, `ApplicationStatus`, `ApplicationAction`
//! - `repository`: `ApplicationRepository` port

mod model;
pub mod repository;

pub use model::{ApplicationAction, ApplicationStatus, LoanApplication, StatusUpdate};
pub use repository::ApplicationRepository;
