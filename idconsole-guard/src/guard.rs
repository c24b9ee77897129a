// Guards for route protection

use crate::{Redirect, RouteParams, SessionProbe};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Default login route.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// What a guard sees about the pending navigation.
#[derive(Debug, Clone)]
pub struct GuardContext {
    /// Requested path, as given to the navigator.
    pub path: String,
    /// Parameters captured by the matched route.
    pub params: RouteParams,
    /// Pattern of the matched route.
    pub pattern: String,
}

impl GuardContext {
    pub fn new(path: impl Into<String>, pattern: impl Into<String>, params: RouteParams) -> Self {
        Self {
            path: path.into(),
            params,
            pattern: pattern.into(),
        }
    }

    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Guard trait for protecting routes.
///
/// A guard runs before the route's view is loaded. Returning a [`Redirect`]
/// abandons the navigation; the view is never mounted.
#[async_trait]
pub trait Guard: Send + Sync {
    /// Determine if the navigation can proceed
    async fn can_activate(&self, context: &GuardContext) -> Result<(), Redirect>;
}

/// Authentication guard - redirects to the login route unless the server
/// confirms a session.
///
/// Every activation asks the probe again; nothing is cached between
/// navigations.
#[derive(Clone)]
pub struct AuthenticatedGuard {
    probe: Arc<dyn SessionProbe>,
    login_path: String,
}

impl AuthenticatedGuard {
    pub fn new(probe: Arc<dyn SessionProbe>) -> Self {
        Self {
            probe,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }

    /// Redirect somewhere other than [`DEFAULT_LOGIN_PATH`].
    pub fn login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn redirect_target(&self) -> &str {
        &self.login_path
    }
}

impl std::fmt::Debug for AuthenticatedGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticatedGuard")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Guard for AuthenticatedGuard {
    async fn can_activate(&self, context: &GuardContext) -> Result<(), Redirect> {
        if self.probe.is_authenticated().await {
            return Ok(());
        }
        debug!(path = %context.path, to = %self.login_path, "No session, redirecting");
        Err(Redirect::to(&self.login_path))
    }
}

/// Custom guard builder
pub struct FnGuard<F>
where
    F: Fn(&GuardContext) -> Result<(), Redirect> + Send + Sync,
{
    predicate: F,
}

impl<F> FnGuard<F>
where
    F: Fn(&GuardContext) -> Result<(), Redirect> + Send + Sync,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

#[async_trait]
impl<F> Guard for FnGuard<F>
where
    F: Fn(&GuardContext) -> Result<(), Redirect> + Send + Sync,
{
    async fn can_activate(&self, context: &GuardContext) -> Result<(), Redirect> {
        (self.predicate)(context)
    }
}
