//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! Vec<ServiceBinding>
//!     → Renderer (target-specific output)
//!     → String (source text, manifest, ...)
//! ```
//!
//! # Design Decisions
//! - Rendering is a pure function of the binding tree
//! - Renderers must reproduce the routing contracts (prefix join, duplicate
//!   keys, middleware order) rather than re-derive them

pub mod manifest;

use thiserror::Error;

use crate::binding::ServiceBinding;
use crate::routing::RouteKey;

pub use manifest::{ManifestEntry, ManifestRenderer};

/// Errors raised by renderers.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Two rules share a `METHOD pattern` key under the reject policy.
    #[error("duplicate route: {key}")]
    DuplicateRoute { key: RouteKey },
}

/// Turns a binding tree into output text.
pub trait Renderer {
    fn render(&self, bindings: &[ServiceBinding]) -> Result<String, RenderError>;
}
