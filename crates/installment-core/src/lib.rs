//! Domain layer of the installment admin client.
//!
//! Models for the gateway resources, the session and theme ports, the route
//! decision and the fetch bookkeeping used by the page controllers. Nothing
//! here performs I/O; storage and HTTP live in the infrastructure and
//! interaction crates.

pub mod application;
pub mod auth;
pub mod config;
pub mod contract;
pub mod dashboard;
pub mod error;
pub mod fetch;
pub mod plan;
pub mod query;
pub mod route;
pub mod serde_util;
pub mod session;
pub mod storage;
pub mod theme;
pub mod view;

pub use error::{AdminError, Result};
