//! Contract domain module.
//!
//! - `model`: `Contract` list rows, `ContractDetail`, status labels
//! - `schedule`: payment schedule normalization and repayment progress
//! - `merge`: overlay of a list row with its detail record
//! - `repository`: `ContractRepository` port

mod merge;
mod model;
pub mod repository;
mod schedule;

pub use merge::merge_detail;
pub use model::{Contract, ContractDetail, contract_status_label};
pub use repository::ContractRepository;
pub use schedule::{
    PaymentScheduleItem, PaymentStatus, RepaymentProgress, normalize_schedule,
};
