use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use installment_core::dashboard::DashboardOverview;
use installment_core::fetch::FetchOptions;
use installment_core::route::Route;
use installment_core::theme::Theme;
use tracing::info;

use super::Console;
use crate::render::{Table, format_date, format_vnd, heading};

/// Shows the overview; with `watch` it re-fetches every `watch` seconds
/// until interrupted, keeping the last figures when a refresh fails.
pub async fn run(console: &Console, watch: Option<u64>) -> Result<()> {
    console.enter(Route::Dashboard).await?;
    let page = &console.ctx.dashboard;

    page.fetch(FetchOptions::full())
        .await
        .context("could not load the dashboard")?;
    if let Some(overview) = page.overview() {
        print_overview(&overview, console);
    }

    let Some(secs) = watch.filter(|s| *s > 0) else {
        return Ok(());
    };
    info!("[Dashboard] Refreshing every {}s", secs);

    let mut ticker = tokio::time::interval(Duration::from_secs(secs));
    ticker.tick().await;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = ticker.tick() => {
                let silent = FetchOptions { silent: true, preserve_scroll: false };
                if page.fetch(silent).await.is_err() {
                    println!("{}", "Refresh failed, showing the last figures.".dimmed());
                }
                if let Some(overview) = page.overview() {
                    println!();
                    print_overview(&overview, console);
                }
            }
        }
    }
    Ok(())
}

fn print_overview(overview: &DashboardOverview, console: &Console) {
    let theme = console.theme();
    heading("Overview", theme);
    stat("Total revenue", &format_vnd(overview.total_revenue));
    println!("  {:<22}{}", "", growth(overview, theme));
    stat("Outstanding debt", &format_vnd(overview.outstanding_debt));
    stat("Active contracts", &overview.active_contracts.to_string());
    stat("Overdue contracts", &overview.overdue_contracts.to_string());
    stat(
        "Applications",
        &format!(
            "{} total, {} approved, {} pending ({:.1}% approved)",
            overview.total_applications,
            overview.approved_applications,
            overview.pending_applications,
            overview.approval_rate()
        ),
    );

    let points = overview.revenue_points();
    if !points.is_empty() {
        println!();
        heading("Revenue", theme);
        let mut table = Table::new(vec!["Month", "Revenue"]);
        for point in points {
            table.row(vec![point.name.as_str().into(), format_vnd(point.revenue).into()]);
        }
        table.print(&console.viewport, theme);
    }

    println!();
    heading("Recent pending applications", theme);
    let mut table = Table::new(vec!["Customer", "Plan / product", "Submitted"]);
    for pending in overview.recent_pending() {
        table.row(vec![
            pending.customer_name.as_deref().unwrap_or("-").into(),
            pending.subject().into(),
            format_date(pending.created_at.as_deref()).into(),
        ]);
    }
    table.print(&console.viewport, theme);
}

fn stat(label: &str, value: &str) {
    println!("  {:<22}{}", label, value.bold());
}

fn growth(overview: &DashboardOverview, theme: Theme) -> String {
    let label = overview.growth_label();
    let cell = if overview.revenue_growth_percent >= 0.0 {
        label.green()
    } else {
        label.red()
    };
    if theme.is_dark() {
        cell.bold().to_string()
    } else {
        cell.to_string()
    }
}
