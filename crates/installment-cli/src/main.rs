//! installment-admin - back-office client for installment lending.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use installment_application::AdminContext;
use installment_infrastructure::{AdminPaths, ConfigService};

mod commands;
mod logging;
mod render;

use commands::Console;
use commands::applications::ApplicationsCommand;
use commands::contracts::ContractsCommand;
use commands::plans::PlansCommand;
use commands::theme::ThemeCommand;
use render::TerminalViewport;

#[derive(Parser, Debug)]
#[command(name = "installment-admin")]
#[command(version, about = "Installment Admin - back-office client for installment lending", long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// First table row to show
    #[arg(long, default_value_t = 0, global = true)]
    offset: usize,

    /// Number of table rows to show
    #[arg(long, default_value_t = 20, global = true)]
    rows: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in operator
    Whoami,
    /// Show the overview figures
    Dashboard {
        /// Refresh every SECS seconds until interrupted
        #[arg(long, value_name = "SECS")]
        watch: Option<u64>,
    },
    /// Installment plans
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Loan applications
    #[command(subcommand)]
    Applications(ApplicationsCommand),
    /// Contracts and payment schedules
    #[command(subcommand)]
    Contracts(ContractsCommand),
    /// Light or dark output
    #[command(subcommand)]
    Theme(ThemeCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = AdminPaths::resolve()?;
    let config = ConfigService::new(&paths).get_config()?;
    logging::init(cli.verbose, &config.logging.level);

    let viewport = Arc::new(TerminalViewport::new(cli.offset, cli.rows));
    let ctx = AdminContext::from_config(&paths, &config, viewport.clone())?;
    ctx.session.bootstrap().await;
    let console = Console::new(ctx, viewport);

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&console, &email, &password).await?
        }
        Commands::Logout => commands::session::logout(&console).await?,
        Commands::Whoami => commands::session::whoami(&console).await?,
        Commands::Dashboard { watch } => commands::dashboard::run(&console, watch).await?,
        Commands::Plans(command) => commands::plans::run(&console, command).await?,
        Commands::Applications(command) => {
            commands::applications::run(&console, command).await?
        }
        Commands::Contracts(command) => commands::contracts::run(&console, command).await?,
        Commands::Theme(command) => commands::theme::run(&console, command)?,
    }

    Ok(())
}
