//! HTTP server dispatch over built route tables.

use std::sync::Arc;

use axum::http::{header, StatusCode};
use route_binder::config::{RegistryScope, RoutingConfig, ServerConfig};
use route_binder::descriptor::HttpRule;
use route_binder::http::{echo_resolver, request_id, HttpServer, X_REQUEST_ID};
use route_binder::lifecycle::{build_tables, shadowed_routes};
use route_binder::routing::{RouteGroup, RouteKey, RouteTable};
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::{body_string, file, method, request, service, text_handler};

fn library_server(config: &RoutingConfig) -> HttpServer {
    let files = [file(
        "library.proto",
        "proto3",
        vec![service(
            "library.Library",
            vec![
                method("GetBook", Some(HttpRule::get("/shelves/{shelf}/books/{book.id}"))),
                method(
                    "UpdateBook",
                    Some(
                        HttpRule::put("/shelves/{shelf}/books/{book.id}")
                            .with_body("book")
                            .with_additional(HttpRule::patch("/shelves/{shelf}/books/{book.id}")),
                    ),
                ),
                method("Purge", Some(HttpRule::custom("PURGE", "/cache"))),
            ],
        )],
    )];

    let tables = build_tables(&files, config, &[request_id()], &echo_resolver).unwrap();
    HttpServer::new(tables, ServerConfig::default())
}

#[tokio::test]
async fn test_serves_bound_route_with_params() {
    let config = RoutingConfig {
        root_prefix: "/api".into(),
        ..RoutingConfig::default()
    };
    let server = library_server(&config);

    let res = server
        .router()
        .oneshot(request("GET", "/api/shelves/s1/books/b7"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(X_REQUEST_ID));

    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["service"], "library.Library");
    assert_eq!(json["method"], "GetBook");
    assert_eq!(json["path_params"]["shelf"], "s1");
    assert_eq!(json["path_params"]["book.id"], "b7");
}

#[tokio::test]
async fn test_additional_binding_reaches_same_method() {
    let server = library_server(&RoutingConfig::default());
    let res = server
        .router()
        .oneshot(request("PATCH", "/shelves/s1/books/b7"))
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["method"], "UpdateBook");
    assert_eq!(json["verb"], "PATCH");
}

#[tokio::test]
async fn test_custom_verb() {
    let server = library_server(&RoutingConfig::default());
    let res = server.router().oneshot(request("PURGE", "/cache")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_not_found_and_method_not_allowed() {
    let server = library_server(&RoutingConfig::default());

    let res = server.router().oneshot(request("GET", "/nope")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = server
        .router()
        .oneshot(request("DELETE", "/shelves/s1/books/b7"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers().get(header::ALLOW).unwrap(), "GET, PUT, PATCH");
}

#[tokio::test]
async fn test_tables_consulted_in_order() {
    let first = Arc::new(RouteTable::new());
    let second = Arc::new(RouteTable::new());
    RouteGroup::root(Arc::clone(&first))
        .route("GET", "/x", text_handler("first"))
        .unwrap();
    let other = RouteGroup::root(Arc::clone(&second));
    other.route("GET", "/x", text_handler("second")).unwrap();
    other.route("GET", "/y", text_handler("only-second")).unwrap();

    let server = HttpServer::new(vec![first, second], ServerConfig::default());

    let res = server.router().oneshot(request("GET", "/x")).await.unwrap();
    assert_eq!(body_string(res).await, "first");
    let res = server.router().oneshot(request("GET", "/y")).await.unwrap();
    assert_eq!(body_string(res).await, "only-second");
}

#[test]
fn test_shared_scope_config() {
    let config = RoutingConfig {
        registry_scope: RegistryScope::Shared,
        ..RoutingConfig::default()
    };
    let files = [
        file(
            "a.proto",
            "proto3",
            vec![service("a.A", vec![method("Get", Some(HttpRule::get("/x")))])],
        ),
        file(
            "b.proto",
            "proto2",
            vec![service("b.B", vec![method("Get", Some(HttpRule::get("/x")))])],
        ),
    ];
    assert!(build_tables(&files, &config, &[], &echo_resolver).is_err());
    assert!(build_tables(&files, &RoutingConfig::default(), &[], &echo_resolver).is_ok());
}

#[tokio::test]
async fn test_route_from_later_file_is_reported_as_shadowed() {
    let files = [
        file(
            "a.proto",
            "proto3",
            vec![service("a.A", vec![method("Get", Some(HttpRule::get("/x")))])],
        ),
        file(
            "b.proto",
            "proto3",
            vec![service("b.B", vec![method("Get", Some(HttpRule::get("/x")))])],
        ),
    ];
    let tables = build_tables(&files, &RoutingConfig::default(), &[], &echo_resolver).unwrap();
    assert_eq!(shadowed_routes(&tables), [(1, RouteKey::new("GET", "/x"))]);

    let server = HttpServer::new(tables, ServerConfig::default());
    let res = server.router().oneshot(request("GET", "/x")).await.unwrap();
    let json: Value = serde_json::from_str(&body_string(res).await).unwrap();
    assert_eq!(json["service"], "a.A");
}
