//! List command - print one page of a resource.

use crate::error::{CliError, CliResult};
use crate::{ListArgs, ResourceKind};
use colored::Colorize;
use idconsole::Console;
use idconsole::api::{Page, PageQuery, Resource};
use serde::Serialize;

pub async fn run(console: &Console, args: ListArgs) -> CliResult<()> {
    let mut query = PageQuery::new().size(args.size);
    if let Some(term) = &args.search {
        query = query.search(term.as_str());
    }
    let query = query.page(args.page);

    let api = console.api();
    match args.resource {
        ResourceKind::Users => print_page(api.users().list(&query).await?),
        ResourceKind::Roles => print_page(api.roles().list(&query).await?),
        ResourceKind::Permissions => print_page(api.permissions().list(&query).await?),
        ResourceKind::Clients => print_page(api.clients().list(&query).await?),
        ResourceKind::Menus => print_page(api.menus().list(&query).await?),
    }
}

fn print_page<R: Resource + Serialize>(page: Page<R>) -> CliResult<()> {
    for item in &page.items {
        let line = serde_json::to_string(item).map_err(|e| CliError::Operation(e.to_string()))?;
        println!("{line}");
    }
    println!("{}", footer(&page).dimmed());
    Ok(())
}

/// One-based page position; the page number comes from the server.
fn footer<R: Resource>(page: &Page<R>) -> String {
    format!(
        "{} page {}/{} ({} total)",
        R::NAME,
        page.page.saturating_add(1),
        page.total_pages().max(1),
        page.total
    )
}
