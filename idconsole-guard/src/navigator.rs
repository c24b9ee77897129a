//! Navigation with guard composition.
//!
//! A navigation resolves the path, runs the route's guards in order and
//! mounts the view only when every guard allows it. A guard redirect restarts
//! the navigation at the redirect target.

use crate::{GuardContext, GuardError, Result, RouteParams, RouteTable};
use tracing::{debug, info};

/// Default cap on redirects followed by one navigation.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Outcome of a completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Path that was originally requested.
    pub requested: String,
    /// Path whose view was mounted.
    pub path: String,
    /// Pattern of the mounted route.
    pub pattern: String,
    /// Name of the mounted view.
    pub view: String,
    /// Parameters the view was mounted with.
    pub params: RouteParams,
    /// Redirect targets followed, in order.
    pub redirects: Vec<String>,
}

impl Navigation {
    /// Whether any guard redirected the navigation.
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Drives navigations over a [`RouteTable`].
#[derive(Debug, Clone)]
pub struct Navigator {
    routes: RouteTable,
    max_redirects: usize,
}

impl Navigator {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            routes,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = max;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Navigate to `path`.
    ///
    /// # Errors
    ///
    /// - [`GuardError::NotFound`] if a path (requested or redirected to)
    ///   matches no route.
    /// - [`GuardError::RedirectLoop`] if more than the configured number of
    ///   redirects would be followed.
    pub async fn navigate(&self, path: &str) -> Result<Navigation> {
        let mut current = path.to_string();
        let mut redirects = Vec::new();

        loop {
            let (route, params) = self
                .routes
                .resolve(&current)
                .ok_or_else(|| GuardError::NotFound(current.clone()))?;

            let context = GuardContext::new(current.clone(), route.pattern().as_str(), params);
            let mut blocked = None;
            for guard in route.guards() {
                if let Err(redirect) = guard.can_activate(&context).await {
                    blocked = Some(redirect);
                    break;
                }
            }

            match blocked {
                None => {
                    route.view().mount(&context.params);
                    info!(
                        path = %current,
                        view = route.view().name(),
                        redirects = redirects.len(),
                        "Navigated"
                    );
                    return Ok(Navigation {
                        requested: path.to_string(),
                        path: current,
                        pattern: context.pattern,
                        view: route.view().name().to_string(),
                        params: context.params,
                        redirects,
                    });
                }
                Some(redirect) => {
                    if redirects.len() >= self.max_redirects {
                        return Err(GuardError::RedirectLoop {
                            path: path.to_string(),
                            hops: redirects.len(),
                        });
                    }
                    debug!(from = %current, to = %redirect.to, "Guard redirected");
                    current = redirect.to.clone();
                    redirects.push(redirect.to);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FnGuard, Redirect, Route, View};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingView {
        name: &'static str,
        mounts: AtomicUsize,
    }

    impl View for CountingView {
        fn name(&self) -> &str {
            self.name
        }

        fn mount(&self, _params: &RouteParams) {
            self.mounts.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn view(name: &'static str) -> Arc<CountingView> {
        Arc::new(CountingView {
            name,
            mounts: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_unguarded_route_mounts() {
        let home = view("home");
        let table = RouteTable::new()
            .with(Route::new("/", home.clone()).unwrap())
            .unwrap();

        let nav = Navigator::new(table).navigate("/").await.unwrap();

        assert_eq!(nav.view, "home");
        assert!(!nav.was_redirected());
        assert_eq!(home.mounts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_redirect_is_followed() {
        let secret = view("secret");
        let login = view("login");
        let table = RouteTable::new()
            .with(
                Route::new("/secret", secret.clone())
                    .unwrap()
                    .before_load(Arc::new(FnGuard::new(|_: &GuardContext| {
                        Err(Redirect::to("/login"))
                    }))),
            )
            .unwrap()
            .with(Route::new("/login", login.clone()).unwrap())
            .unwrap();

        let nav = Navigator::new(table).navigate("/secret").await.unwrap();

        assert_eq!(nav.requested, "/secret");
        assert_eq!(nav.path, "/login");
        assert_eq!(nav.redirects, vec!["/login".to_string()]);
        assert_eq!(secret.mounts.load(Ordering::SeqCst), 0);
        assert_eq!(login.mounts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_first_failing_guard_wins() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let table = RouteTable::new()
            .with(
                Route::new("/a", view("a"))
                    .unwrap()
                    .before_load(Arc::new(FnGuard::new(|_: &GuardContext| {
                        Err(Redirect::to("/b"))
                    })))
                    .before_load(Arc::new(FnGuard::new(move |_: &GuardContext| {
                        seen.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    }))),
            )
            .unwrap()
            .with(Route::new("/b", view("b")).unwrap())
            .unwrap();

        let nav = Navigator::new(table).navigate("/a").await.unwrap();

        assert_eq!(nav.view, "b");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_redirect_loop_detected() {
        let table = RouteTable::new()
            .with(
                Route::new("/loop", view("loop"))
                    .unwrap()
                    .before_load(Arc::new(FnGuard::new(|_: &GuardContext| {
                        Err(Redirect::to("/loop"))
                    }))),
            )
            .unwrap();

        let err = Navigator::new(table)
            .max_redirects(3)
            .navigate("/loop")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GuardError::RedirectLoop {
                path: "/loop".to_string(),
                hops: 3
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let err = Navigator::new(RouteTable::new())
            .navigate("/missing")
            .await
            .unwrap_err();
        assert_eq!(err, GuardError::NotFound("/missing".to_string()));
    }

    #[tokio::test]
    async fn test_redirect_to_unknown_path() {
        let table = RouteTable::new()
            .with(
                Route::new("/x", view("x"))
                    .unwrap()
                    .before_load(Arc::new(FnGuard::new(|_: &GuardContext| {
                        Err(Redirect::to("/nowhere"))
                    }))),
            )
            .unwrap();

        let err = Navigator::new(table).navigate("/x").await.unwrap_err();
        assert_eq!(err, GuardError::NotFound("/nowhere".to_string()));
    }
}
