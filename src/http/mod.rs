//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace layer)
//!     → route tables (resolve method + path, in table order)
//!     → composed handler
//!         → request.rs middleware (request ID, access log)
//!         → response.rs (echo handler used by `serve`)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{access_log, request_id, RequestId, X_REQUEST_ID};
pub use response::{echo_handler, echo_resolver};
pub use server::HttpServer;
