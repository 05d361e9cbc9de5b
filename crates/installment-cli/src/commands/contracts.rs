use anyhow::{Context, Result, bail};
use clap::Subcommand;
use colored::Colorize;
use installment_core::contract::ContractDetail;
use installment_core::fetch::FetchOptions;
use installment_core::route::Route;

use super::Console;
use super::applications::FilterArgs;
use crate::render::{Cell, Table, Tone, format_date, format_money, heading};

#[derive(Subcommand, Debug)]
pub enum ContractsCommand {
    /// List contracts
    #[command(alias = "ls")]
    List(FilterArgs),
    /// Show one contract with its payment schedule
    Show { id: i64 },
}

pub async fn run(console: &Console, command: ContractsCommand) -> Result<()> {
    console.enter(Route::Contracts).await?;
    let page = &console.ctx.contracts;

    match command {
        ContractsCommand::List(filters) => {
            for (name, value) in filters.pairs() {
                page.set_filter(name, value);
            }
            page.fetch(FetchOptions::full())
                .await
                .context("could not load contracts")?;
            print_contracts(console);
        }
        ContractsCommand::Show { id } => {
            // The list row supplies fields the detail record leaves out.
            if page.fetch(FetchOptions::full()).await.is_err() {
                eprintln!("{}", "Contract list unavailable, showing the detail only.".dimmed());
            }
            let Some(detail) = page.view_detail(id).await else {
                bail!("could not load contract {}", id);
            };
            print_detail(console, &detail);
        }
    }
    Ok(())
}

fn print_contracts(console: &Console) {
    let theme = console.theme();
    heading("Contracts", theme);

    let mut table = Table::new(vec![
        "ID", "Code", "Application", "Customer", "Product", "Plan", "Loan", "Remaining", "Status",
    ]);
    for contract in console.ctx.contracts.contracts() {
        table.row(vec![
            contract.id.map(|id| id.to_string()).unwrap_or_default().into(),
            contract.code.as_str().into(),
            contract.application_code.as_deref().unwrap_or("-").into(),
            contract.customer_name.as_deref().unwrap_or("-").into(),
            contract.product_name.as_deref().unwrap_or("-").into(),
            contract.plan_name.as_deref().unwrap_or("-").into(),
            format_money(contract.total_loan).into(),
            format_money(contract.remaining_amount).into(),
            Cell::badge(contract.status_label(), Tone::of_status(&contract.status)),
        ]);
    }
    table.print(&console.viewport, theme);
}

fn print_detail(console: &Console, detail: &ContractDetail) {
    let theme = console.theme();
    let contract = &detail.contract;
    heading(&format!("Contract {}", contract.code), theme);

    let field = |label: &str, value: &str| println!("  {:<14}{}", label, value);
    field("Customer", contract.customer_name.as_deref().unwrap_or("-"));
    field("Product", contract.product_name.as_deref().unwrap_or("-"));
    field("Plan", contract.plan_name.as_deref().unwrap_or("-"));
    field("Total loan", &format_money(contract.total_loan));
    field("Remaining", &format_money(contract.remaining_amount));
    field("Status", contract.status_label());

    let progress = detail.progress();
    field(
        "Repaid",
        &format!("{}/{} periods ({}%)", progress.paid, progress.total, progress.percent),
    );

    println!();
    heading("Payment schedule", theme);
    let mut table = Table::new(vec!["Period", "Due", "Amount", "Principal", "Interest", "Status"]);
    for item in &detail.payment_schedule {
        table.row(vec![
            item.period.to_string().into(),
            format_date(item.due_date.as_deref()).into(),
            format_money(item.amount).into(),
            format_money(item.principal_amount).into(),
            format_money(item.interest_amount).into(),
            Cell::badge(item.status.label(), Tone::of_payment(item.status)),
        ]);
    }
    table.print(&console.viewport, theme);
}
