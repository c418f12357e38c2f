//! JSON route manifest.
//!
//! # Responsibilities
//! - List every rule with its full, prefixed pattern, in binding order
//! - Apply the same duplicate-key check a route table would

use std::sync::Arc;

use serde::Serialize;

use crate::binding::ServiceBinding;
use crate::observability::metrics;
use crate::render::{RenderError, Renderer};
use crate::routing::{join_path, DuplicatePolicy, RouteKey, RouteRegistry};

/// One route in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestEntry {
    pub service: String,
    pub method: String,
    pub verb: String,
    pub pattern: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    pub path_params: Vec<String>,
}

/// Renders every rule as a manifest entry, in binding order.
#[derive(Debug, Clone, Default)]
pub struct ManifestRenderer {
    prefix: String,
    policy: DuplicatePolicy,
    registry: Option<Arc<RouteRegistry>>,
}

impl ManifestRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report patterns as mounted under `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check keys against `registry` instead of a fresh one per call.
    pub fn with_registry(mut self, registry: Arc<RouteRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Manifest entries of `bindings`.
    ///
    /// A repeated `METHOD pattern` key fails under the reject policy; under
    /// the warn policy it is logged and only the first entry is kept.
    pub fn entries(
        &self,
        bindings: &[ServiceBinding],
    ) -> Result<Vec<ManifestEntry>, RenderError> {
        let local;
        let registry = match &self.registry {
            Some(registry) => registry.as_ref(),
            None => {
                local = RouteRegistry::new();
                &local
            }
        };

        let mut entries = Vec::new();
        for service in bindings {
            for method in &service.methods {
                for rule in &method.rules {
                    let pattern = join_path(&self.prefix, rule.pattern());
                    let key = RouteKey::new(rule.method(), pattern.as_str());

                    if !registry.claim(&key) {
                        metrics::record_duplicate_route(&key.method);
                        match self.policy {
                            DuplicatePolicy::Reject => {
                                return Err(RenderError::DuplicateRoute { key });
                            }
                            DuplicatePolicy::Warn => {
                                tracing::warn!(
                                    route = %key,
                                    service = %service.name,
                                    method = %method.name,
                                    "Duplicate route left out of the manifest"
                                );
                                continue;
                            }
                        }
                    }

                    entries.push(ManifestEntry {
                        service: service.name.clone(),
                        method: method.name.clone(),
                        verb: key.method,
                        pattern,
                        body: rule.body().to_string(),
                        path_params: rule.path_params().to_vec(),
                    });
                }
            }
        }

        Ok(entries)
    }
}

impl Renderer for ManifestRenderer {
    fn render(&self, bindings: &[ServiceBinding]) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(&self.entries(bindings)?)?)
    }
}
