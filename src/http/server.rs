//! HTTP server setup.
//!
//! # Responsibilities
//! - Create an Axum Router whose fallback dispatches into route tables
//! - Wire up the trace layer
//! - Bind server to listener with graceful shutdown
//!
//! # Design Decisions
//! - Several tables can share one listener; they are consulted in order and
//!   the first match wins
//! - 405 (with `Allow`) only when no table matches the path with this method

use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routing::table::{dispatch_resolution, Resolution};
use crate::routing::RouteTable;

/// HTTP server for built route tables.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(tables: Vec<Arc<RouteTable>>, config: ServerConfig) -> Self {
        let router = Self::build_router(Arc::new(tables));
        Self { router, config }
    }

    fn build_router(tables: Arc<Vec<Arc<RouteTable>>>) -> Router {
        Router::new()
            .fallback(move |req: Request<Body>| {
                let tables = Arc::clone(&tables);
                async move { dispatch(&tables, req).await }
            })
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve `req` against `tables` in order and invoke the match.
pub async fn dispatch(tables: &[Arc<RouteTable>], req: Request<Body>) -> Response {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let mut allowed = Vec::new();

    for table in tables {
        match table.resolve(&method, &path) {
            Resolution::Matched(found) => {
                return dispatch_resolution(Resolution::Matched(found), req).await;
            }
            Resolution::MethodNotAllowed { allowed: more } => {
                for m in more {
                    if !allowed.contains(&m) {
                        allowed.push(m);
                    }
                }
            }
            Resolution::NotFound => {}
        }
    }

    tracing::debug!(method = %method, path = %path, "No route matched");
    let resolution = if allowed.is_empty() {
        Resolution::NotFound
    } else {
        Resolution::MethodNotAllowed { allowed }
    };
    dispatch_resolution(resolution, req).await
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
