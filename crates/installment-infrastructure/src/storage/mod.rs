//! Key/value storage implementations.

mod atomic_file;
mod local;
mod memory;

pub use atomic_file::{read_optional, write_atomic};
pub use local::LocalStorage;
pub use memory::MemoryStorage;
