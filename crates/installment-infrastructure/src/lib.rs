//! Local persistence and environment for the installment admin client.

pub mod color_scheme;
pub mod config_service;
pub mod paths;
pub mod session_store;
pub mod storage;
pub mod theme_store;

pub use color_scheme::EnvColorScheme;
pub use config_service::ConfigService;
pub use paths::AdminPaths;
pub use session_store::StorageSessionStore;
pub use storage::{LocalStorage, MemoryStorage};
pub use theme_store::StorageThemeStore;
