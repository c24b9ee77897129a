//! Error types for the idconsole CLI.

use idconsole::ConsoleError;
use idconsole::api::ApiError;
use idconsole::config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The server did not confirm a session
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Any other failed operation
    #[error("{0}")]
    Operation(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Operation(_) => 1,
            CliError::Config(_) => 2,
            CliError::NotAuthenticated(_) => 3,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        if e.is_unauthorized() {
            CliError::NotAuthenticated(e.to_string())
        } else {
            CliError::Operation(e.to_string())
        }
    }
}

impl From<ConsoleError> for CliError {
    fn from(e: ConsoleError) -> Self {
        match e {
            ConsoleError::Config(e) => e.into(),
            ConsoleError::Api(e) => e.into(),
            ConsoleError::Http(e) => ApiError::from(e).into(),
            ConsoleError::Guard(e) => CliError::Operation(e.to_string()),
        }
    }
}
