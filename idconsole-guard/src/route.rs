//! Route patterns, parameters and the route table.

use crate::{Guard, GuardError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Something a route renders once navigation is allowed.
pub trait View: Send + Sync {
    /// Display name, used in logs.
    fn name(&self) -> &str;

    /// Mount the view with the matched path parameters.
    fn mount(&self, params: &RouteParams);
}

/// Path parameters captured by `:name` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    params: HashMap<String, String>,
}

impl RouteParams {
    /// Get a parameter value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parse a parameter into `T`.
    pub fn parse<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|v| v.parse().ok())
    }

    /// Number of captured parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Check if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A parsed route pattern such as `/users/:id/roles`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern. It must start with `/`; `:name` segments capture.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::InvalidRoute`] for a missing leading slash, an
    /// unnamed parameter or a parameter name used twice.
    pub fn parse(pattern: &str) -> Result<Self> {
        if !pattern.starts_with('/') {
            return Err(GuardError::InvalidRoute(format!(
                "{pattern}: must start with '/'"
            )));
        }

        let mut segments = Vec::new();
        for part in split_path(pattern) {
            match part.strip_prefix(':') {
                Some("") => {
                    return Err(GuardError::InvalidRoute(format!(
                        "{pattern}: unnamed parameter"
                    )));
                }
                Some(name) => {
                    if segments
                        .iter()
                        .any(|s| matches!(s, Segment::Param(p) if p == name))
                    {
                        return Err(GuardError::InvalidRoute(format!(
                            "{pattern}: duplicate parameter '{name}'"
                        )));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Static(part.to_string())),
            }
        }

        Ok(Self {
            raw: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Match a path (query string and fragment ignored).
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let parts: Vec<&str> = split_path(strip_suffixes(path)).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Static(expected) if expected == part => {}
                Segment::Static(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
            }
        }
        Some(RouteParams { params })
    }

    /// Number of static segments, used to prefer `/users/new` over `/users/:id`.
    fn specificity(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Static(_)))
            .count()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

/// A navigable route: pattern, `before_load` guards and view.
#[derive(Clone)]
pub struct Route {
    pattern: RoutePattern,
    guards: Vec<Arc<dyn Guard>>,
    view: Arc<dyn View>,
}

impl Route {
    /// Create an unguarded route.
    ///
    /// # Errors
    ///
    /// See [`RoutePattern::parse`].
    pub fn new(pattern: &str, view: Arc<dyn View>) -> Result<Self> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            guards: Vec::new(),
            view,
        })
    }

    /// Add a guard run before the view loads. Guards run in insertion order.
    pub fn before_load(mut self, guard: Arc<dyn Guard>) -> Self {
        self.guards.push(guard);
        self
    }

    /// The route pattern.
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    /// The route's guards.
    pub fn guards(&self) -> &[Arc<dyn Guard>] {
        &self.guards
    }

    /// Whether any guard protects the route.
    pub fn is_protected(&self) -> bool {
        !self.guards.is_empty()
    }

    /// The route's view.
    pub fn view(&self) -> &Arc<dyn View> {
        &self.view
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.raw)
            .field("guards", &self.guards.len())
            .field("view", &self.view.name())
            .finish()
    }
}

/// Ordered collection of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::DuplicateRoute`] if the same pattern is already
    /// registered.
    pub fn add(&mut self, route: Route) -> Result<()> {
        if self.routes.iter().any(|r| r.pattern == route.pattern) {
            return Err(GuardError::DuplicateRoute(route.pattern.raw.clone()));
        }
        self.routes.push(route);
        Ok(())
    }

    /// Builder-style [`add`](Self::add).
    ///
    /// # Errors
    ///
    /// See [`add`](Self::add).
    pub fn with(mut self, route: Route) -> Result<Self> {
        self.add(route)?;
        Ok(self)
    }

    /// Find the most specific route matching `path`.
    pub fn resolve(&self, path: &str) -> Option<(&Route, RouteParams)> {
        self.routes
            .iter()
            .filter_map(|route| route.pattern.matches(path).map(|params| (route, params)))
            .max_by_key(|(route, _)| route.pattern.specificity())
    }

    /// All routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str);

    impl View for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn mount(&self, _params: &RouteParams) {}
    }

    fn route(pattern: &str, name: &'static str) -> Route {
        Route::new(pattern, Arc::new(Named(name))).unwrap()
    }

    #[test]
    fn test_static_match() {
        let pattern = RoutePattern::parse("/users").unwrap();
        assert!(pattern.matches("/users").is_some());
        assert!(pattern.matches("/users/").is_some());
        assert!(pattern.matches("/roles").is_none());
        assert!(pattern.matches("/users/1").is_none());
    }

    #[test]
    fn test_root_match() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("/users").is_none());
    }

    #[test]
    fn test_param_capture() {
        let pattern = RoutePattern::parse("/users/:id/roles").unwrap();
        let params = pattern.matches("/users/42/roles?tab=all").unwrap();
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.parse::<u64>("id"), Some(42));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(RoutePattern::parse("users").is_err());
        assert!(RoutePattern::parse("/users/:").is_err());
        assert!(RoutePattern::parse("/a/:id/b/:id").is_err());
    }

    #[test]
    fn test_most_specific_route_wins() {
        let table = RouteTable::new()
            .with(route("/clients/:id", "client-detail"))
            .unwrap()
            .with(route("/clients/new", "client-new"))
            .unwrap();

        let (found, params) = table.resolve("/clients/new").unwrap();
        assert_eq!(found.view().name(), "client-new");
        assert!(params.is_empty());

        let (found, params) = table.resolve("/clients/abc").unwrap();
        assert_eq!(found.view().name(), "client-detail");
        assert_eq!(params.get("id"), Some("abc"));
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut table = RouteTable::new();
        table.add(route("/users", "users")).unwrap();
        assert_eq!(
            table.add(route("/users", "users-again")),
            Err(GuardError::DuplicateRoute("/users".to_string()))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_unknown_path() {
        let table = RouteTable::new().with(route("/users", "users")).unwrap();
        assert!(table.resolve("/nope").is_none());
    }
}
