use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use colored::Colorize;
use installment_application::page::ApplicationsPage;
use installment_core::route::Route;

use super::Console;
use crate::render::{Cell, Table, Tone, format_date, format_money, heading};

#[derive(Subcommand, Debug)]
pub enum ApplicationsCommand {
    /// List loan applications
    #[command(alias = "ls")]
    List(FilterArgs),
    /// Approve a pending application
    Approve {
        id: i64,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Reject a pending application
    Reject {
        id: i64,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Apply a named action (approve or reject) to an application
    Act {
        id: i64,
        #[arg(long)]
        action: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Status filter, e.g. PENDING
    #[arg(long)]
    pub status: Option<String>,
    /// Free-text search
    #[arg(long)]
    pub q: Option<String>,
}

impl FilterArgs {
    pub fn pairs(&self) -> [(&'static str, &str); 2] {
        [
            ("status", self.status.as_deref().unwrap_or_default()),
            ("q", self.q.as_deref().unwrap_or_default()),
        ]
    }
}

pub async fn run(console: &Console, command: ApplicationsCommand) -> Result<()> {
    console.enter(Route::Applications).await?;
    let page = &console.ctx.applications;

    let (id, action, filters) = match command {
        ApplicationsCommand::List(filters) => {
            load(page, &filters).await?;
            print_applications(console);
            return Ok(());
        }
        ApplicationsCommand::Approve { id, filters } => (id, "approve".to_string(), filters),
        ApplicationsCommand::Reject { id, filters } => (id, "reject".to_string(), filters),
        ApplicationsCommand::Act {
            id,
            action,
            filters,
        } => (id, action, filters),
    };

    load(page, &filters).await?;
    page.apply_action(id, &action).await.map_err(|e| {
        anyhow!(page.error().unwrap_or_else(|| e.to_string()))
    })?;

    let status = page
        .applications()
        .into_iter()
        .find(|app| app.id == id)
        .map(|app| app.status_label().to_string())
        .unwrap_or_else(|| action.clone());
    println!("{} {} -> {}", "Application".green(), id, status.bold());
    print_applications(console);
    Ok(())
}

/// Submits the filter form: a full reload with the given filters.
async fn load(page: &ApplicationsPage, filters: &FilterArgs) -> Result<()> {
    for (name, value) in filters.pairs() {
        page.set_filter(name, value);
    }
    page.submit_filters()
        .await
        .context("could not load applications")?;
    Ok(())
}

fn print_applications(console: &Console) {
    let theme = console.theme();
    heading("Loan applications", theme);

    let mut table = Table::new(vec![
        "ID", "Code", "Customer", "Phone", "Product", "Loan", "Plan", "Submitted", "Status",
    ]);
    for app in console.ctx.applications.applications() {
        table.row(vec![
            app.id.to_string().into(),
            app.code.as_str().into(),
            app.customer_name.as_str().into(),
            app.customer_phone.as_deref().unwrap_or("-").into(),
            app.product_name.as_str().into(),
            format_money(app.loan_amount).into(),
            app.plan_name.as_deref().unwrap_or("-").into(),
            format_date(app.created_at.as_deref()).into(),
            Cell::badge(app.status_label(), Tone::of_status(&app.status)),
        ]);
    }
    table.print(&console.viewport, theme);
}
