//! Application layer of the installment admin client.
//!
//! Session lifecycle, route guarding, theme preference and the page
//! controllers, wired together by [`AdminContext`].

pub mod context;
pub mod page;
pub mod route_guard;
pub mod session_controller;
pub mod theme_controller;

pub use context::{AdminContext, Repositories};
pub use route_guard::RouteGuard;
pub use session_controller::SessionController;
pub use theme_controller::ThemeController;
