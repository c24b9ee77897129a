//! The admin console's route tree.

use crate::{
    AuthenticatedGuard, Guard, GuardError, Result, Route, RouteParams, RoutePattern, RouteTable,
    SessionProbe, View,
};
use std::sync::Arc;
use tracing::info;

/// One entry of the console route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleRoute {
    /// View name.
    pub name: &'static str,
    /// Route pattern.
    pub pattern: &'static str,
    /// Whether the authentication guard runs before the view loads.
    pub protected: bool,
}

const fn protected(name: &'static str, pattern: &'static str) -> ConsoleRoute {
    ConsoleRoute {
        name,
        pattern,
        protected: true,
    }
}

/// Every console page. The login page itself is public.
pub const CONSOLE_ROUTES: &[ConsoleRoute] = &[
    ConsoleRoute {
        name: "login",
        pattern: "/login",
        protected: false,
    },
    protected("dashboard", "/"),
    protected("users", "/users"),
    protected("user-roles", "/users/:id/roles"),
    protected("roles", "/roles"),
    protected("role-permissions", "/roles/:id/permissions"),
    protected("permissions", "/permissions"),
    protected("clients", "/clients"),
    protected("menus", "/menus"),
];

/// Build the console route table.
///
/// Protected routes share one [`AuthenticatedGuard`] over `probe` that
/// redirects to `login_path`; `view_for` supplies each page's view.
///
/// # Errors
///
/// Fails only if `login_path` collides with a console route pattern in a way
/// the table rejects.
pub fn console_routes<F>(
    probe: Arc<dyn SessionProbe>,
    login_path: &str,
    mut view_for: F,
) -> Result<RouteTable>
where
    F: FnMut(&ConsoleRoute) -> Arc<dyn View>,
{
    let guard: Arc<dyn Guard> = Arc::new(AuthenticatedGuard::new(probe).login_path(login_path));
    let mut table = RouteTable::new();

    for entry in CONSOLE_ROUTES {
        let pattern = if entry.protected { entry.pattern } else { login_path };
        let mut route = Route::new(pattern, view_for(entry))?;
        if entry.protected {
            route = route.before_load(guard.clone());
        }
        table.add(route)?;
    }

    Ok(table)
}

/// Check that `login_path` can sit next to the protected console routes.
///
/// # Errors
///
/// [`GuardError::InvalidRoute`] for a malformed path and
/// [`GuardError::DuplicateRoute`] when it is one of the protected patterns.
pub fn check_login_path(login_path: &str) -> Result<()> {
    let login = RoutePattern::parse(login_path)?;
    for entry in CONSOLE_ROUTES.iter().filter(|entry| entry.protected) {
        if RoutePattern::parse(entry.pattern)? == login {
            return Err(GuardError::DuplicateRoute(login_path.to_string()));
        }
    }
    Ok(())
}

/// View that only reports its mount through tracing. Used where no UI exists.
#[derive(Debug, Clone)]
pub struct TracingView {
    name: String,
}

impl TracingView {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl View for TracingView {
    fn name(&self) -> &str {
        &self.name
    }

    fn mount(&self, params: &RouteParams) {
        info!(view = %self.name, ?params, "View mounted");
    }
}
