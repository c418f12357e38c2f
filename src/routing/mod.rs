//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Construction (at startup):
//!     RouteGroup::root(table)
//!     → group(prefix, middleware) (prefix join, stack inheritance)
//!     → register(method, pattern, handler, middleware)
//!         → registry.rs (duplicate check, shared across the tree)
//!         → middleware.rs (compose group + route middleware)
//!         → table.rs (store composed handler)
//!
//! Dispatch (per request):
//!     table.rs (resolve method + path)
//!     → matcher.rs (template match, capture path params)
//!     → composed handler
//! ```
//!
//! # Design Decisions
//! - Routes composed at startup, read-only afterwards
//! - Duplicate `METHOD pattern` keys are rejected, never overwritten
//! - Deterministic: first registered match wins

pub mod group;
pub mod matcher;
pub mod middleware;
pub mod mount;
pub mod registry;
pub mod table;

use thiserror::Error;

pub use group::RouteGroup;
pub use matcher::{PathParams, PathTemplate};
pub use middleware::{compose, Handler, Middleware, Next};
pub use mount::{mount_bindings, HandlerResolver, MountReport};
pub use registry::{RouteKey, RouteRegistry};
pub use table::{DuplicatePolicy, Registration, Resolution, RouteMatch, RouteTable};

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("duplicate route: {key}")]
    DuplicateRoute { key: RouteKey },

    #[error("route `{pattern}` has an empty HTTP method")]
    EmptyMethod { pattern: String },

    #[error("invalid route pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("no handler for {service}.{method}")]
    MissingHandler { service: String, method: String },
}

/// Join two path fragments with exactly one `/` between them.
///
/// Empty or `/`-only fragments are no-ops; a result that would be empty is `/`.
pub fn join_path(base: &str, fragment: &str) -> String {
    let base = base.trim_end_matches('/');
    let fragment = fragment.trim_start_matches('/');

    match (base.is_empty(), fragment.is_empty()) {
        (true, true) => "/".to_string(),
        (false, true) => base.to_string(),
        _ => format!("{base}/{fragment}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "/api"), "/api");
        assert_eq!(join_path("/api", "/v1"), "/api/v1");
        assert_eq!(join_path("/api/", "/v1"), "/api/v1");
        assert_eq!(join_path("/api", "v1"), "/api/v1");
        assert_eq!(join_path("/api", ""), "/api");
        assert_eq!(join_path("/api", "/"), "/api");
        assert_eq!(join_path("", ""), "/");
        assert_eq!(join_path("/", "/"), "/");
        assert_eq!(join_path("/api", "/items/"), "/api/items/");
    }
}
