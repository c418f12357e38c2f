//! Route table: the dispatch surface route groups mount into.
//!
//! # Responsibilities
//! - Check new routes against the shared registry
//! - Store composed handlers in registration order
//! - Resolve concrete requests to a handler plus captured path parameters
//!
//! # Design Decisions
//! - Exact `METHOD pattern` keys; lookup of concrete paths is a linear scan,
//!   first registered match wins
//! - Mutated only while the table is being built; dispatch takes a read lock
//!   and never holds it across an await
//! - Duplicates never overwrite: they are rejected, or ignored with a warning

use std::sync::{Arc, PoisonError, RwLock};

use axum::body::Body;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::observability::metrics;
use crate::routing::matcher::{PathParams, PathTemplate};
use crate::routing::middleware::Handler;
use crate::routing::registry::{RouteKey, RouteRegistry};
use crate::routing::RouteError;

/// What to do when a route key is registered twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the registration with [`RouteError::DuplicateRoute`].
    #[default]
    Reject,
    /// Log a warning and keep the first handler.
    Warn,
}

/// Outcome of a successful registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    Mounted(RouteKey),
    /// Duplicate under [`DuplicatePolicy::Warn`]; the first handler stays.
    Ignored(RouteKey),
}

impl Registration {
    pub fn key(&self) -> &RouteKey {
        match self {
            Registration::Mounted(key) | Registration::Ignored(key) => key,
        }
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self, Registration::Mounted(_))
    }
}

#[derive(Debug, Clone)]
struct MountedRoute {
    method: String,
    template: PathTemplate,
    handler: Handler,
}

/// A handler resolved for a concrete request.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    pub key: RouteKey,
    pub handler: Handler,
    pub params: PathParams,
}

/// Result of resolving a request against the table.
#[derive(Debug, Clone)]
pub enum Resolution {
    Matched(RouteMatch),
    /// The path matched but not with this method.
    MethodNotAllowed { allowed: Vec<String> },
    NotFound,
}

/// Mounted routes plus a handle to the duplicate registry.
#[derive(Debug)]
pub struct RouteTable {
    registry: Arc<RouteRegistry>,
    policy: DuplicatePolicy,
    routes: RwLock<Vec<MountedRoute>>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteTable {
    /// A table with its own registry and the reject policy.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RouteRegistry::new()))
    }

    /// A table checking duplicates against an existing registry.
    pub fn with_registry(registry: Arc<RouteRegistry>) -> Self {
        Self {
            registry,
            policy: DuplicatePolicy::default(),
            routes: RwLock::new(Vec::new()),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Claim `key` in the registry. `Ok(false)` means the key is a duplicate
    /// ignored under the warn policy.
    pub(crate) fn claim(&self, key: &RouteKey) -> Result<bool, RouteError> {
        if self.registry.claim(key) {
            return Ok(true);
        }

        metrics::record_duplicate_route(&key.method);
        match self.policy {
            DuplicatePolicy::Reject => Err(RouteError::DuplicateRoute { key: key.clone() }),
            DuplicatePolicy::Warn => {
                tracing::warn!(route = %key, "Duplicate route ignored, keeping first handler");
                Ok(false)
            }
        }
    }

    /// Store an already-claimed route.
    pub(crate) fn insert(&self, key: &RouteKey, template: PathTemplate, handler: Handler) {
        self.routes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(MountedRoute {
                method: key.method.clone(),
                template,
                handler,
            });

        metrics::record_route_registered(&key.method);
        tracing::debug!(route = %key, "Route mounted");
    }

    /// Exact lookup by method and full pattern.
    pub fn lookup(&self, method: &str, pattern: &str) -> Option<Handler> {
        self.read_routes()
            .iter()
            .find(|r| r.method == method && r.template.pattern() == pattern)
            .map(|r| r.handler.clone())
    }

    /// Mounted route keys in registration order.
    pub fn routes(&self) -> Vec<RouteKey> {
        self.read_routes()
            .iter()
            .map(|r| RouteKey::new(r.method.as_str(), r.template.pattern()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read_routes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_routes().is_empty()
    }

    /// Resolve a concrete method and path.
    pub fn resolve(&self, method: &str, path: &str) -> Resolution {
        let routes = self.read_routes();
        let mut allowed = Vec::new();

        for route in routes.iter() {
            let Some(params) = route.template.matches(path) else {
                continue;
            };
            if route.method == method {
                return Resolution::Matched(RouteMatch {
                    key: RouteKey::new(route.method.as_str(), route.template.pattern()),
                    handler: route.handler.clone(),
                    params,
                });
            }
            if !allowed.contains(&route.method) {
                allowed.push(route.method.clone());
            }
        }

        if allowed.is_empty() {
            Resolution::NotFound
        } else {
            Resolution::MethodNotAllowed { allowed }
        }
    }

    /// Resolve and invoke the handler for `req`.
    ///
    /// Captured [`PathParams`] are inserted into the request extensions.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        let resolution = self.resolve(req.method().as_str(), req.uri().path());
        dispatch_resolution(resolution, req).await
    }

    fn read_routes(&self) -> std::sync::RwLockReadGuard<'_, Vec<MountedRoute>> {
        self.routes.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Answer a request from an already computed [`Resolution`].
pub async fn dispatch_resolution(resolution: Resolution, mut req: Request<Body>) -> Response {
    match resolution {
        Resolution::Matched(found) => {
            req.extensions_mut().insert(found.params);
            found.handler.call(req).await
        }
        Resolution::MethodNotAllowed { allowed } => {
            let mut res = StatusCode::METHOD_NOT_ALLOWED.into_response();
            if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
                res.headers_mut().insert(header::ALLOW, value);
            }
            res
        }
        Resolution::NotFound => (StatusCode::NOT_FOUND, "No matching route found").into_response(),
    }
}
