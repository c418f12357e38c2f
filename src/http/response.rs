//! Stub responses for served bindings.
//!
//! The `serve` command has no service implementations to call, so every
//! bound method answers with a JSON description of what matched.

use axum::body::Body;
use axum::http::Request;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::binding::MethodBinding;
use crate::http::request::RequestId;
use crate::routing::{Handler, PathParams};

/// Handler echoing the service, method and captured path parameters.
pub fn echo_handler(service: &str, method: &MethodBinding) -> Handler {
    let service = service.to_string();
    let method = method.name.clone();

    Handler::from_fn(move |req: Request<Body>| {
        let service = service.clone();
        let method = method.clone();
        async move {
            let params: Map<String, Value> = req
                .extensions()
                .get::<PathParams>()
                .map(|params| {
                    params
                        .iter()
                        .map(|(k, v)| (k.to_string(), Value::from(v)))
                        .collect()
                })
                .unwrap_or_default();
            let request_id = req.extensions().get::<RequestId>().map(|id| id.0.clone());

            Json(json!({
                "service": service,
                "method": method,
                "verb": req.method().as_str(),
                "path": req.uri().path(),
                "path_params": params,
                "request_id": request_id,
            }))
            .into_response()
        }
    })
}

/// [`HandlerResolver`](crate::routing::HandlerResolver) answering every
/// method with [`echo_handler`].
pub fn echo_resolver(service: &str, method: &MethodBinding) -> Option<Handler> {
    Some(echo_handler(service, method))
}
