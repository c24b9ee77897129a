//! idconsole CLI - inspect and drive an OAuth2 identity admin API from the
//! terminal.
//!
//! # Commands
//!
//! - `idconsole status` - Ask the server whether the session is valid
//! - `idconsole whoami` - Show the signed-in user
//! - `idconsole navigate <path>` - Run a console navigation through its guards
//! - `idconsole list <resource>` - List users, roles, permissions, clients or menus
//! - `idconsole logout` - End the session
//!
//! Every run starts with an empty cookie jar; pass `--username`/`--password`
//! (or `IDCONSOLE_USERNAME`/`IDCONSOLE_PASSWORD`) to log in first.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use idconsole::Console;
use idconsole::config::{ConsoleConfig, load_dotenv};
use idconsole::log::{Level, LogConfig};
use std::path::PathBuf;

mod commands;
mod error;

use error::{CliError, CliResult};

/// Identity admin console from the command line
#[derive(Parser)]
#[command(name = "idconsole")]
#[command(author = "Pegasus Heavy Industries LLC")]
#[command(version)]
#[command(about = "Session-aware client for the identity admin API")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides configuration)
    #[arg(long, global = true, env = "IDCONSOLE_API_BASE_URL")]
    base_url: Option<String>,

    /// Log in with this username before running the command
    #[arg(short, long, global = true, env = "IDCONSOLE_USERNAME")]
    username: Option<String>,

    /// Password for --username
    #[arg(short, long, global = true, env = "IDCONSOLE_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// TOML configuration file; environment variables still override it
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the server confirms a session
    Status,

    /// Show the signed-in user
    Whoami,

    /// Navigate to a console path, following guard redirects
    #[command(alias = "nav")]
    Navigate {
        /// Console path, e.g. /users or /roles/3/permissions
        path: String,
    },

    /// List a resource page
    #[command(alias = "ls")]
    List(ListArgs),

    /// End the session
    Logout,
}

#[derive(Args)]
struct ListArgs {
    /// Resource to list
    #[arg(value_enum)]
    resource: ResourceKind,

    /// Zero-based page number
    #[arg(long, default_value_t = 0)]
    page: u32,

    /// Page size
    #[arg(long, default_value_t = idconsole::api::DEFAULT_PAGE_SIZE)]
    size: u32,

    /// Search term
    #[arg(short, long)]
    search: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResourceKind {
    Users,
    Roles,
    Permissions,
    Clients,
    Menus,
}

fn load_config(cli: &Cli) -> CliResult<ConsoleConfig> {
    let mut config = match &cli.config {
        Some(path) => ConsoleConfig::from_file(path)?.merge_env()?,
        None => ConsoleConfig::from_env()?,
    };
    if let Some(url) = &cli.base_url {
        config.api_base_url = url.clone();
    }
    config.validate()?;
    Ok(config)
}

fn init_logging(cli: &Cli) -> CliResult<()> {
    let mut log = LogConfig::from_env()?;
    if cli.verbose {
        log.debug = true;
        log.level = log.level.min(Level::Debug);
    }
    if cli.no_color {
        log.color = false;
    }
    idconsole::log::init(&log);
    Ok(())
}

async fn run(cli: Cli) -> CliResult<()> {
    load_dotenv()?;
    init_logging(&cli)?;
    let config = load_config(&cli)?;
    let console = Console::new(config)?;

    if let Some(username) = &cli.username {
        let password = cli.password.as_deref().ok_or_else(|| {
            CliError::Config("--password is required with --username".to_string())
        })?;
        console.session().login(username, password).await?;
    }

    match cli.command {
        Commands::Status => commands::session::status(&console).await,
        Commands::Whoami => commands::session::whoami(&console).await,
        Commands::Navigate { path } => commands::navigate::run(&console, &path).await,
        Commands::List(args) => commands::list::run(&console, args).await,
        Commands::Logout => commands::session::logout(&console).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}
