// Error types for route guards and navigation

use thiserror::Error;

/// Instruction to abandon the current navigation and go elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Redirect to {to}")]
pub struct Redirect {
    /// Target path.
    pub to: String,
}

impl Redirect {
    /// Redirect to `path`.
    pub fn to(path: impl Into<String>) -> Self {
        Self { to: path.into() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("No route matches {0}")]
    NotFound(String),

    #[error("Too many redirects navigating to {path} ({hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    #[error("Invalid route pattern: {0}")]
    InvalidRoute(String),

    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),
}

pub type Result<T> = std::result::Result<T, GuardError>;
