//! Session commands: status, whoami, logout.

use super::{field, success, warn};
use crate::error::{CliError, CliResult};
use colored::Colorize;
use idconsole::Console;
use idconsole::guard::SessionStatus;

/// Report whether the server confirms a session.
pub async fn status(console: &Console) -> CliResult<()> {
    match console.check_session().await {
        SessionStatus::Authenticated => {
            success("Session is active");
            Ok(())
        }
        SessionStatus::Unauthenticated => Err(CliError::NotAuthenticated(
            "the server did not confirm a session".to_string(),
        )),
        SessionStatus::Unreachable => Err(CliError::Operation(format!(
            "could not reach {}",
            console.config().api_base_url
        ))),
    }
}

/// Show the signed-in user.
pub async fn whoami(console: &Console) -> CliResult<()> {
    let me = console.session().current_user().await?;

    println!("{}", me.username.cyan().bold());
    field("ID", &me.id.to_string());
    if let Some(nickname) = &me.nickname {
        field("Name", nickname);
    }
    if !me.roles.is_empty() {
        field("Roles", &me.roles.join(", "));
    }
    if !me.permissions.is_empty() {
        field("Permissions", &me.permissions.len().to_string());
    }
    Ok(())
}

/// End the session.
pub async fn logout(console: &Console) -> CliResult<()> {
    match console.session().logout().await {
        Ok(()) => {
            success("Logged out");
            Ok(())
        }
        Err(e) if e.is_unauthorized() => {
            warn("No active session");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
