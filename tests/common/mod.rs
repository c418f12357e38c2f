//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use route_binder::descriptor::{FileDescriptor, HttpRule, MethodDefinition, ServiceDefinition};
use route_binder::routing::{Handler, Middleware, Next};

pub fn method(name: &str, http: Option<HttpRule>) -> MethodDefinition {
    MethodDefinition {
        name: name.into(),
        http,
    }
}

pub fn service(name: &str, methods: Vec<MethodDefinition>) -> ServiceDefinition {
    ServiceDefinition {
        name: name.into(),
        methods,
    }
}

pub fn file(name: &str, syntax: &str, services: Vec<ServiceDefinition>) -> FileDescriptor {
    FileDescriptor {
        name: name.into(),
        syntax: Some(syntax.into()),
        edition: None,
        services,
    }
}

/// Handler answering 200 with a fixed body.
pub fn text_handler(body: &'static str) -> Handler {
    Handler::from_fn(move |_req: Request<Body>| async move {
        (StatusCode::OK, body).into_response()
    })
}

/// Shared log of middleware/handler invocations.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Middleware recording its name on the way in.
pub fn recording(log: &CallLog, name: &'static str) -> Middleware {
    let log = Arc::clone(log);
    Middleware::from_fn(name, move |req, next: Next| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push(name.to_string());
            next.run(req).await
        }
    })
}

/// Handler recording `"handler"` when called.
pub fn recording_handler(log: &CallLog) -> Handler {
    let log = Arc::clone(log);
    Handler::from_fn(move |_req: Request<Body>| {
        let log = Arc::clone(&log);
        async move {
            log.lock().unwrap().push("handler".to_string());
            StatusCode::OK.into_response()
        }
    })
}

pub fn request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(res: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
