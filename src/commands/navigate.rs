//! Navigate command - run a navigation through the console's guards.

use super::{field, success};
use crate::error::{CliError, CliResult};
use idconsole::Console;

pub async fn run(console: &Console, path: &str) -> CliResult<()> {
    let navigation = console.navigate(path).await?;

    if console.sent_to_login(&navigation) {
        return Err(CliError::NotAuthenticated(format!(
            "{} requires a session; redirected to {}",
            navigation.requested, navigation.path
        )));
    }

    success(&format!("Mounted {}", navigation.view));
    field("Path", &navigation.path);
    field("Route", &navigation.pattern);
    if navigation.was_redirected() {
        field("Redirects", &navigation.redirects.join(" -> "));
    }
    Ok(())
}
