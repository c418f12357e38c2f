//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::DuplicatePolicy;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct BinderConfig {
    /// Route table construction settings.
    pub routing: RoutingConfig,

    /// HTTP server settings (`serve` command).
    pub server: ServerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How duplicate detection is scoped across route tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryScope {
    /// One registry per table (per descriptor file).
    #[default]
    Table,
    /// One registry shared by every table served together.
    Shared,
}

/// Route table construction settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Prefix applied to every mounted route (e.g. "/api").
    pub root_prefix: String,

    /// Behaviour on duplicate `METHOD pattern` keys.
    pub duplicate_policy: DuplicatePolicy,

    /// Scope of duplicate detection.
    pub registry_scope: RegistryScope,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
