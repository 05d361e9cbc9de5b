pub mod applications;
pub mod contracts;
pub mod dashboard;
pub mod plans;
pub mod session;
pub mod theme;

use std::sync::Arc;

use anyhow::{Result, bail};
use colored::Colorize;
use installment_application::AdminContext;
use installment_core::route::{Route, RouteDecision};
use installment_core::theme::Theme;

use crate::render::TerminalViewport;

/// The wired client plus the terminal window its tables render into.
pub struct Console {
    pub ctx: AdminContext,
    pub viewport: Arc<TerminalViewport>,
}

impl Console {
    pub fn new(ctx: AdminContext, viewport: Arc<TerminalViewport>) -> Self {
        Self { ctx, viewport }
    }

    pub fn theme(&self) -> Theme {
        self.ctx.theme.current()
    }

    /// Navigates to `route` through the route guard. A redirect prints the
    /// sign-in hint and fails the command.
    pub async fn enter(&self, route: Route) -> Result<()> {
        match self.ctx.guard.check(&route).await {
            RouteDecision::Admit => Ok(()),
            RouteDecision::Loading => bail!("session is still loading"),
            RouteDecision::Redirect { to, from } => {
                eprintln!(
                    "{}",
                    format!("{} needs a signed-in session ({}).", from, to).yellow()
                );
                eprintln!("Run: installment-admin login --email <email> --password <password>");
                bail!("not signed in")
            }
        }
    }
}
