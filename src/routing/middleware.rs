//! Handlers and handler-wrapping middleware.
//!
//! # Responsibilities
//! - Type-erase async request handlers behind a cheap-to-clone [`Handler`]
//! - Represent middleware as a function from handler to handler
//! - Compose route and group middleware in a fixed order
//!
//! # Design Decisions
//! - `Middleware::from_fn` mirrors `axum::middleware::from_fn`: the closure
//!   gets the request and a [`Next`] to continue the chain
//! - Composition happens once at registration; dispatch only calls the result

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;

type HandlerFn = dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync;
type WrapFn = dyn Fn(Handler) -> Handler + Send + Sync;

/// A type-erased async request handler.
#[derive(Clone)]
pub struct Handler(Arc<HandlerFn>);

impl Handler {
    pub fn from_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self(Arc::new(move |req| f(req).boxed()))
    }

    pub fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        (self.0)(req)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

/// The remainder of a middleware chain.
#[derive(Debug, Clone)]
pub struct Next {
    inner: Handler,
}

impl Next {
    /// Pass the request to the next layer and await its response.
    pub async fn run(self, req: Request<Body>) -> Response {
        self.inner.call(req).await
    }
}

/// A handler-wrapping function.
#[derive(Clone)]
pub struct Middleware {
    name: Arc<str>,
    wrap: Arc<WrapFn>,
}

impl Middleware {
    /// Middleware from a raw `Handler -> Handler` function.
    pub fn new<F>(name: impl Into<Arc<str>>, wrap: F) -> Self
    where
        F: Fn(Handler) -> Handler + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            wrap: Arc::new(wrap),
        }
    }

    /// Middleware from an async function of `(request, next)`.
    pub fn from_fn<F, Fut>(name: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(Request<Body>, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let f = Arc::new(f);
        Self::new(name, move |inner: Handler| {
            let f = Arc::clone(&f);
            Handler::from_fn(move |req| {
                let next = Next {
                    inner: inner.clone(),
                };
                (*f)(req, next)
            })
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn wrap(&self, handler: Handler) -> Handler {
        (self.wrap)(handler)
    }
}

impl fmt::Debug for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Middleware").field(&self.name).finish()
    }
}

/// Wrap `handler` with route middleware first, then the group stack.
///
/// The result is `group[0](group[1](..(route[last](..route[0](handler)))))`,
/// so a request passes the group stack in declaration order before any route
/// middleware.
pub fn compose(handler: Handler, group: &[Middleware], route: &[Middleware]) -> Handler {
    let handler = route.iter().fold(handler, |inner, m| m.wrap(inner));
    group.iter().rev().fold(handler, |inner, m| m.wrap(inner))
}
