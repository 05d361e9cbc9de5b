//! Login page.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use installment_core::auth::{AuthRepository, LoginRequest};
use installment_core::error::Result;
use installment_core::route::Route;
use tracing::{error, info};

use super::InlineMessage;
use crate::session_controller::SessionController;

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed, please check your credentials.";

pub struct LoginPage {
    auth: Arc<dyn AuthRepository>,
    session: Arc<SessionController>,
    submitting: AtomicBool,
    error: InlineMessage,
}

impl LoginPage {
    pub fn new(auth: Arc<dyn AuthRepository>, session: Arc<SessionController>) -> Self {
        Self {
            auth,
            session,
            submitting: AtomicBool::new(false),
            error: InlineMessage::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Signs in and returns where to go next: the route the operator was
    /// redirected away from, else the dashboard.
    pub async fn submit(&self, email: &str, password: &str) -> Result<Route> {
        self.error.clear();
        self.submitting.store(true, Ordering::SeqCst);
        let result = self.try_submit(LoginRequest::new(email, password)).await;
        self.submitting.store(false, Ordering::SeqCst);

        if let Err(e) = &result {
            error!("[Login] Sign-in failed for {}: {}", email, e);
            self.error.set(e.user_message(LOGIN_FAILED_MESSAGE));
        }
        result
    }

    async fn try_submit(&self, request: LoginRequest) -> Result<Route> {
        let response = self.auth.authenticate(&request).await?;
        self.session.login(response.access_token, response.user).await?;

        let destination = self.session.take_redirect().unwrap_or(Route::Dashboard);
        info!("[Login] Signed in, continuing to {}", destination);
        Ok(destination)
    }
}
