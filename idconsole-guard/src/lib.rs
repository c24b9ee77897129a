//! Session-verified route guards for the identity admin console.
//!
//! Protected routes ask the server, through the [`idconsole_http`] client,
//! whether the current session is valid before their view is mounted. There
//! is no client-side session flag: every navigation re-checks, and any
//! failure (network, non-2xx, null body) redirects to the login route.
//!
//! # Example
//!
//! ```rust,no_run
//! use idconsole_guard::*;
//! use idconsole_http::{ApiClient, ApiClientConfig, MemoryStorage};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<()> {
//! let client = ApiClient::new(
//!     ApiClientConfig::default(),
//!     Arc::new(MemoryStorage::new()),
//! )
//! .expect("client");
//!
//! let probe = Arc::new(ServerSessionProbe::new(client));
//! let routes = console_routes(probe, "/login", |entry| {
//!     Arc::new(TracingView::new(entry.name))
//! })?;
//!
//! let navigation = Navigator::new(routes).navigate("/users").await?;
//! if navigation.was_redirected() {
//!     println!("sent to {}", navigation.path);
//! }
//! # Ok(())
//! # }
//! ```

mod console;
mod error;
mod guard;
mod navigator;
mod route;
mod session;

pub use console::{
    CONSOLE_ROUTES, ConsoleRoute, TracingView, check_login_path, console_routes,
};
pub use error::{GuardError, Redirect, Result};
pub use guard::{AuthenticatedGuard, DEFAULT_LOGIN_PATH, FnGuard, Guard, GuardContext};
pub use navigator::{DEFAULT_MAX_REDIRECTS, Navigation, Navigator};
pub use route::{Route, RouteParams, RoutePattern, RouteTable, View};
pub use session::{
    CURRENT_USER_PATH, ServerSessionProbe, SessionProbe, SessionStatus, check_session,
    is_authenticated,
};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        AuthenticatedGuard, Guard, GuardContext, GuardError, Navigation, Navigator, Redirect,
        Route, RouteParams, RouteTable, ServerSessionProbe, SessionProbe, View, console_routes,
        is_authenticated,
    };
}
