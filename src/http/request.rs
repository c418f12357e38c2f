//! Request middleware.
//!
//! # Responsibilities
//! - Assign a request ID (UUID v4) unless the client sent one
//! - Echo the request ID on the response
//! - Log one line per request with method, path, status and latency
//!
//! # Design Decisions
//! - Both are [`Middleware`] values, so they can sit at any level of a
//!   route tree; the `serve` command installs them on the root group

use std::time::Instant;

use axum::http::HeaderValue;
use uuid::Uuid;

use crate::routing::{Middleware, Next};

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Request ID stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

/// Middleware assigning and propagating `x-request-id`.
pub fn request_id() -> Middleware {
    Middleware::from_fn("request_id", |mut req, next: Next| async move {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let header = HeaderValue::from_str(&id).ok();
        if let Some(value) = &header {
            req.headers_mut().insert(X_REQUEST_ID, value.clone());
        }
        req.extensions_mut().insert(RequestId(id));

        let mut res = next.run(req).await;
        if let Some(value) = header {
            res.headers_mut().insert(X_REQUEST_ID, value);
        }
        res
    })
}

/// Middleware logging each request once its response is ready.
pub fn access_log() -> Middleware {
    Middleware::from_fn("access_log", |req, next: Next| async move {
        let start = Instant::now();
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());

        let res = next.run(req).await;

        tracing::info!(
            request_id = request_id.as_deref().unwrap_or("unknown"),
            method = %method,
            path = %path,
            status = res.status().as_u16(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Request handled"
        );
        res
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{compose, Handler};
    use axum::body::Body;
    use axum::http::Request;
    use axum::response::{IntoResponse, Response};

    fn echo_id() -> Handler {
        Handler::from_fn(|req: Request<Body>| async move {
            let id = req.extensions().get::<RequestId>().cloned();
            id.map(|id| id.0).unwrap_or_default().into_response()
        })
    }

    #[tokio::test]
    async fn test_generates_id() {
        let handler = compose(echo_id(), &[request_id()], &[]);
        let res: Response = handler.call(Request::new(Body::empty())).await;
        let header = res.headers().get(X_REQUEST_ID).unwrap().to_str().unwrap().to_string();
        assert!(Uuid::parse_str(&header).is_ok());
    }

    #[tokio::test]
    async fn test_keeps_client_id() {
        let handler = compose(echo_id(), &[request_id(), access_log()], &[]);
        let req = Request::builder()
            .header(X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        let res = handler.call(req).await;
        assert_eq!(res.headers().get(X_REQUEST_ID).unwrap(), "abc-123");

        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"abc-123");
    }
}
