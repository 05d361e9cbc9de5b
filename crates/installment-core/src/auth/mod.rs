//! Authentication domain module.
//!
//! - `model`: login request/response payloads
//! - `repository`: `AuthRepository` port for the identity endpoints

mod model;
pub mod repository;

pub use model::{LoginRequest, LoginResponse};
pub use repository::AuthRepository;
