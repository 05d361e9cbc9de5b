use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use colored::Colorize;
use installment_application::page::{PLAN_SAVE_FAILED_MESSAGE, PlansPage};
use installment_core::fetch::FetchOptions;
use installment_core::plan::{Plan, PlanForm};
use installment_core::route::Route;

use super::Console;
use crate::render::{Cell, Table, Tone, format_vnd, heading};

#[derive(Subcommand, Debug)]
pub enum PlansCommand {
    /// List installment plans
    #[command(alias = "ls")]
    List {
        /// Also print per-tenor repayment quotes
        #[arg(long)]
        quotes: bool,
    },
    /// Create a plan
    Create(PlanArgs),
    /// Update an existing plan; omitted fields keep their current value
    Update {
        id: i64,
        #[command(flatten)]
        fields: PlanArgs,
    },
    /// Deactivate a plan
    Deactivate { id: i64 },
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    #[arg(long)]
    code: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// Partner id (1 = FE Credit, 2 = Home Credit)
    #[arg(long)]
    partner: Option<i64>,
    #[arg(long)]
    min_price: Option<f64>,
    /// Down payment in percent
    #[arg(long)]
    down_payment: Option<f64>,
    /// Monthly interest rate in percent
    #[arg(long)]
    interest: Option<f64>,
    /// Comma-separated tenors in months, e.g. 3,6,12
    #[arg(long)]
    tenors: Option<String>,
    /// Mark the plan inactive
    #[arg(long)]
    inactive: bool,
}

impl PlanArgs {
    fn apply_to(self, mut form: PlanForm) -> PlanForm {
        if let Some(code) = self.code {
            form.code = code;
        }
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(partner) = self.partner {
            form.partner_id = partner;
        }
        if let Some(min_price) = self.min_price {
            form.min_price = min_price;
        }
        if let Some(down_payment) = self.down_payment {
            form.down_payment_percent = down_payment;
        }
        if let Some(interest) = self.interest {
            form.interest_rate = interest;
        }
        if let Some(tenors) = self.tenors {
            form.allowed_tenors = tenors;
        }
        if self.inactive {
            form.active = false;
        }
        form
    }
}

pub async fn run(console: &Console, command: PlansCommand) -> Result<()> {
    console.enter(Route::Plans).await?;
    let page = &console.ctx.plans;

    match command {
        PlansCommand::List { quotes } => {
            load(page).await?;
            print_plans(console, quotes);
        }
        PlansCommand::Create(fields) => {
            page.cancel_edit();
            page.set_form(fields.apply_to(PlanForm::default()));
            let plan = submit(page).await?;
            println!("{} {} ({})", "Created plan".green(), plan.code.bold(), plan.id);
            print_plans(console, false);
        }
        PlansCommand::Update { id, fields } => {
            load(page).await?;
            let plan = page
                .plans()
                .into_iter()
                .find(|p| p.id == id)
                .ok_or_else(|| anyhow!("plan {} not found", id))?;
            page.edit(&plan);
            page.set_form(fields.apply_to(page.form()));
            let plan = submit(page).await?;
            println!("{} {}", "Updated plan".green(), plan.code.bold());
            print_plans(console, false);
        }
        PlansCommand::Deactivate { id } => {
            let plan = page
                .deactivate(id)
                .await
                .with_context(|| format!("could not deactivate plan {}", id))?;
            println!("{} {}", "Deactivated plan".green(), plan.code.bold());
            print_plans(console, false);
        }
    }
    Ok(())
}

async fn load(page: &PlansPage) -> Result<()> {
    page.fetch(FetchOptions::full())
        .await
        .context("could not load installment plans")?;
    Ok(())
}

async fn submit(page: &PlansPage) -> Result<Plan> {
    page.submit().await.map_err(|_| {
        anyhow!(
            page.error()
                .unwrap_or_else(|| PLAN_SAVE_FAILED_MESSAGE.to_string())
        )
    })
}

fn print_plans(console: &Console, quotes: bool) {
    let theme = console.theme();
    let plans = console.ctx.plans.plans();
    heading("Installment plans", theme);

    let mut table = Table::new(vec![
        "ID", "Code", "Name", "Partner", "Min price", "Down", "Rate/mo", "Tenors", "Status",
    ]);
    for plan in &plans {
        let (label, tone) = if plan.active {
            ("Active", Tone::Good)
        } else {
            ("Inactive", Tone::Neutral)
        };
        table.row(vec![
            plan.id.to_string().into(),
            plan.code.as_str().into(),
            plan.name.as_str().into(),
            plan.partner_label().into(),
            format_vnd(plan.min_price).into(),
            format!("{}%", plan.down_payment_percent).into(),
            format!("{}%", plan.interest_rate).into(),
            plan.allowed_tenors.as_str().into(),
            Cell::badge(label, tone),
        ]);
    }
    table.print(&console.viewport, theme);

    if quotes {
        for plan in plans.iter().filter(|p| p.active) {
            println!();
            heading(&format!("{} on {}", plan.code, format_vnd(plan.min_price)), theme);
            let mut table = Table::new(vec!["Months", "Down payment", "Loan", "Monthly"]);
            for quote in plan.quotes() {
                table.row(vec![
                    quote.months.to_string().into(),
                    format_vnd(quote.down_payment).into(),
                    format_vnd(quote.loan_amount).into(),
                    format_vnd(quote.monthly_payment).into(),
                ]);
            }
            table.print(&console.viewport, theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_fields_keep_form_values() {
        let args = PlanArgs {
            name: Some("FE 0% 6 thang".to_string()),
            tenors: Some("6".to_string()),
            ..PlanArgs::default()
        };
        let form = args.apply_to(PlanForm {
            code: "FE-0".to_string(),
            ..PlanForm::default()
        });
        assert_eq!(form.code, "FE-0");
        assert_eq!(form.name, "FE 0% 6 thang");
        assert_eq!(form.allowed_tenors, "6");
        assert_eq!(form.down_payment_percent, 20.0);
        assert!(form.active);
    }
}
