//! HTTP binding compiler and route table library.
//!
//! Turns HTTP annotations on RPC service definitions into canonical rules,
//! then mounts them on a tree of route groups with ordered middleware and
//! duplicate-route rejection.

pub mod binding;
pub mod config;
pub mod descriptor;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;

pub use binding::{build_file, Rule, ServiceBinding, ServiceBindingBuilder};
pub use config::BinderConfig;
pub use http::HttpServer;
pub use routing::{Handler, Middleware, RouteGroup, RouteTable};
