//! Session domain module.
//!
//! This module contains the authenticated-identity model, its durable form,
//! and the ports the session controller depends on.
//!
//! # Module Structure
//!
//! - `model`: `Session`, `StoredSession`, `AuthUser`, `SessionPhase`
//! - `store`: `SessionStore` port for the persisted session record
//! - `token`: `TokenSource` port read by the remote resource accessors
//!
//! # Usage
//!
//! ```ignore
//! use installment_core::session::{Session, SessionPhase, SessionStore, TokenSource};
//! ```

mod model;
mod store;
mod token;

// Re-export public API
pub use model::{AuthUser, Session, SessionPhase, StoredSession};
pub use store::SessionStore;
pub use token::{StaticToken, TokenSource};
