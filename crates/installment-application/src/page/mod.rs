//! Page controllers.
//!
//! Each page owns its list state ([`PageState`]) and talks to one repository
//! port. Remote failures never escape as panics: refreshes log and keep the
//! previous data, form submissions log and leave an inline message.

mod applications;
mod contracts;
mod dashboard;
mod login;
mod plans;
mod state;

use std::sync::{Mutex, PoisonError};

pub use applications::ApplicationsPage;
pub use contracts::ContractsPage;
pub use dashboard::DashboardPage;
pub use login::{LOGIN_FAILED_MESSAGE, LoginPage};
pub use plans::{PLAN_SAVE_FAILED_MESSAGE, PlansPage};
pub use state::{PageObserver, PageState};

/// The error text shown next to a form.
#[derive(Debug, Default)]
pub struct InlineMessage(Mutex<Option<String>>);

impl InlineMessage {
    pub fn get(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set(&self, message: impl Into<String>) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }

    pub fn clear(&self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
