//! Route groups: nested prefix and middleware scopes over one table.
//!
//! # Responsibilities
//! - Compose prefixes with exactly one `/` between fragments
//! - Inherit the parent middleware stack and append group additions
//! - Register routes: full pattern, duplicate check, handler composition
//!
//! # Design Decisions
//! - Every group of a tree holds the same `Arc<RouteTable>`, so duplicate
//!   detection is global to the tree, never per branch
//! - `use_middleware` only affects routes registered after the call
//! - Groups are cheap to clone: a prefix, a short `Vec` and an `Arc`

use std::sync::Arc;

use crate::routing::matcher::PathTemplate;
use crate::routing::middleware::{compose, Handler, Middleware};
use crate::routing::registry::RouteKey;
use crate::routing::table::{Registration, RouteTable};
use crate::routing::{join_path, RouteError};

/// A node in a route tree.
#[derive(Debug, Clone)]
pub struct RouteGroup {
    prefix: String,
    middleware: Vec<Middleware>,
    table: Arc<RouteTable>,
}

impl RouteGroup {
    /// Root group with an empty prefix over `table`.
    pub fn root(table: Arc<RouteTable>) -> Self {
        Self {
            prefix: String::new(),
            middleware: Vec::new(),
            table,
        }
    }

    /// Root group with `prefix` over `table`.
    pub fn with_prefix(table: Arc<RouteTable>, prefix: &str) -> Self {
        Self {
            prefix: group_prefix("", prefix),
            middleware: Vec::new(),
            table,
        }
    }

    /// Create a child scope.
    pub fn group<I>(&self, prefix: &str, middleware: I) -> RouteGroup
    where
        I: IntoIterator<Item = Middleware>,
    {
        let mut stack = self.middleware.clone();
        stack.extend(middleware);
        RouteGroup {
            prefix: group_prefix(&self.prefix, prefix),
            middleware: stack,
            table: Arc::clone(&self.table),
        }
    }

    /// Append middleware for routes registered from now on.
    pub fn use_middleware<I>(&mut self, middleware: I) -> &mut Self
    where
        I: IntoIterator<Item = Middleware>,
    {
        self.middleware.extend(middleware);
        self
    }

    /// Register a handler under `method` and this group's prefix.
    pub fn register<I>(
        &self,
        method: &str,
        pattern: &str,
        handler: Handler,
        route_middleware: I,
    ) -> Result<Registration, RouteError>
    where
        I: IntoIterator<Item = Middleware>,
    {
        let key = self.route_key(method, pattern)?;
        let template = PathTemplate::compile(&key.pattern)?;

        if !self.table.claim(&key)? {
            return Ok(Registration::Ignored(key));
        }

        let route_middleware: Vec<Middleware> = route_middleware.into_iter().collect();
        let handler = compose(handler, &self.middleware, &route_middleware);
        self.table.insert(&key, template, handler);

        Ok(Registration::Mounted(key))
    }

    /// Register without route-specific middleware.
    pub fn route(
        &self,
        method: &str,
        pattern: &str,
        handler: Handler,
    ) -> Result<Registration, RouteError> {
        self.register(method, pattern, handler, [])
    }

    /// The key `register` would use for `method` and `pattern`.
    pub fn route_key(&self, method: &str, pattern: &str) -> Result<RouteKey, RouteError> {
        if method.is_empty() {
            return Err(RouteError::EmptyMethod {
                pattern: pattern.to_string(),
            });
        }
        Ok(RouteKey::new(method, join_path(&self.prefix, pattern)))
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn middleware(&self) -> &[Middleware] {
        &self.middleware
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }
}

/// Group prefixes never keep a trailing `/`; the root prefix is empty.
fn group_prefix(parent: &str, fragment: &str) -> String {
    join_path(parent, fragment).trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn ok() -> Handler {
        Handler::from_fn(|_req| async { StatusCode::OK.into_response() })
    }

    fn noop(name: &'static str) -> Middleware {
        Middleware::new(name, |h| h)
    }

    #[test]
    fn test_nested_prefixes() {
        let root = RouteGroup::root(Arc::new(RouteTable::new()));
        let v1 = root.group("/api", []).group("/v1", []);
        assert_eq!(v1.prefix(), "/api/v1");

        let sloppy = root.group("api/", []).group("//v1/", []);
        assert_eq!(sloppy.prefix(), "/api/v1");
    }

    #[test]
    fn test_empty_prefix_is_noop() {
        let root = RouteGroup::with_prefix(Arc::new(RouteTable::new()), "/svc");
        assert_eq!(root.group("", []).prefix(), "/svc");
        assert_eq!(root.group("/", []).prefix(), "/svc");
        assert_eq!(RouteGroup::root(Arc::new(RouteTable::new())).group("/", []).prefix(), "");
    }

    #[test]
    fn test_full_patterns() {
        let root = RouteGroup::root(Arc::new(RouteTable::new()));
        let api = root.group("/api", []);
        assert_eq!(api.route_key("GET", "/users").unwrap().pattern, "/api/users");
        assert_eq!(api.route_key("GET", "users").unwrap().pattern, "/api/users");
        assert_eq!(api.route_key("GET", "/").unwrap().pattern, "/api");
        assert_eq!(root.route_key("GET", "").unwrap().pattern, "/");
    }

    #[test]
    fn test_middleware_inherited_and_appended() {
        let mut root = RouteGroup::root(Arc::new(RouteTable::new()));
        root.use_middleware([noop("global")]);
        let child = root.group("/a", [noop("m1"), noop("m2")]);

        let names: Vec<&str> = child.middleware().iter().map(Middleware::name).collect();
        assert_eq!(names, ["global", "m1", "m2"]);
        assert_eq!(root.middleware().len(), 1);
    }

    #[test]
    fn test_groups_share_table() {
        let root = RouteGroup::root(Arc::new(RouteTable::new()));
        let a = root.group("/a", []);
        let b = a.group("/b", []);
        assert!(Arc::ptr_eq(root.table(), b.table()));

        b.route("GET", "/c", ok()).unwrap();
        assert_eq!(root.table().routes(), [RouteKey::new("GET", "/a/b/c")]);
    }

    #[test]
    fn test_empty_method_rejected() {
        let root = RouteGroup::root(Arc::new(RouteTable::new()));
        let err = root.route("", "/x", ok()).unwrap_err();
        assert!(matches!(err, RouteError::EmptyMethod { .. }));
        assert!(root.table().is_empty());
    }
}
