use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use installment_core::theme::Theme;

use super::Console;

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    /// Show the active theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// light or dark
        theme: Theme,
    },
}

pub fn run(console: &Console, command: ThemeCommand) -> Result<()> {
    let theme = match command {
        ThemeCommand::Show => console.ctx.theme.current(),
        ThemeCommand::Toggle => console.ctx.theme.toggle(),
        ThemeCommand::Set { theme } => console.ctx.theme.set(theme),
    };
    let label = theme.to_string();
    if theme.is_dark() {
        println!("Theme: {}", label.bright_white().on_black());
    } else {
        println!("Theme: {}", label.black().on_white());
    }
    Ok(())
}
