use anyhow::{Result, anyhow};
use colored::Colorize;
use installment_application::page::LOGIN_FAILED_MESSAGE;
use installment_core::route::Route;

use super::Console;

pub async fn login(console: &Console, email: &str, password: &str) -> Result<()> {
    console.enter(Route::Login).await?;
    let login = &console.ctx.login;

    let next = login.submit(email, password).await.map_err(|_| {
        anyhow!(
            login
                .error()
                .unwrap_or_else(|| LOGIN_FAILED_MESSAGE.to_string())
        )
    })?;

    let user = console.ctx.session.user().await;
    let name = user.as_ref().map(|u| u.display_name()).unwrap_or(email);
    println!("{} {}", "Signed in as".green(), name.bold());
    println!("Continue with: {}", next);
    Ok(())
}

pub async fn logout(console: &Console) -> Result<()> {
    console.ctx.session.logout().await?;
    println!("{}", "Signed out.".green());
    Ok(())
}

pub async fn whoami(console: &Console) -> Result<()> {
    let session = console.ctx.session.snapshot().await;
    if !session.is_authenticated() {
        println!("{}", "Not signed in.".dimmed());
        return Ok(());
    }

    match &session.user {
        Some(user) => {
            println!("{}", user.display_name().bold());
            if let Some(email) = &user.email {
                println!("  email: {}", email);
            }
            if let Some(role) = &user.role {
                println!("  role:  {}", role);
            }
        }
        None => println!("{}", "Signed in (no profile stored).".bold()),
    }
    Ok(())
}
