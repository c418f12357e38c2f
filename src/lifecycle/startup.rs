//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the service bindings of every descriptor file
//! - Create one route table per file, scoped per the registry setting
//! - Install request middleware on each root group and mount the bindings
//! - Report routes that an earlier table already serves
//! - Build the route manifest under the same duplicate rules
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Tables are built in file order, so with a shared registry the first
//!   file to claim a route owns it
//! - With per-table registries a key may be mounted by several files; only
//!   the first table answers it, so later copies are logged and counted

use std::sync::Arc;

use thiserror::Error;

use crate::binding::{build_file, BindingError};
use crate::config::{RegistryScope, RoutingConfig};
use crate::descriptor::FileDescriptor;
use crate::observability::metrics;
use crate::render::{ManifestEntry, ManifestRenderer, RenderError};
use crate::routing::{
    mount_bindings, HandlerResolver, Middleware, RouteError, RouteGroup, RouteKey, RouteRegistry,
    RouteTable,
};

/// Errors that abort table construction.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{file}: {source}")]
    Binding {
        file: String,
        #[source]
        source: BindingError,
    },

    #[error("{file}: {source}")]
    Route {
        file: String,
        #[source]
        source: RouteError,
    },

    #[error("{file}: {source}")]
    Render {
        file: String,
        #[source]
        source: RenderError,
    },
}

fn registry_for(config: &RoutingConfig, shared: &Arc<RouteRegistry>) -> Arc<RouteRegistry> {
    match config.registry_scope {
        RegistryScope::Shared => Arc::clone(shared),
        RegistryScope::Table => Arc::new(RouteRegistry::new()),
    }
}

/// Build one route table per descriptor file.
///
/// `middleware` is installed on every root group before any route is
/// mounted, making it the outermost layer of every handler.
pub fn build_tables<R>(
    files: &[FileDescriptor],
    config: &RoutingConfig,
    middleware: &[Middleware],
    resolver: &R,
) -> Result<Vec<Arc<RouteTable>>, StartupError>
where
    R: HandlerResolver + ?Sized,
{
    let shared = Arc::new(RouteRegistry::new());
    let mut tables = Vec::with_capacity(files.len());

    for file in files {
        let bindings = build_file(file).map_err(|source| StartupError::Binding {
            file: file.name.clone(),
            source,
        })?;

        let table = Arc::new(
            RouteTable::with_registry(registry_for(config, &shared))
                .with_policy(config.duplicate_policy),
        );

        let mut root = RouteGroup::with_prefix(Arc::clone(&table), &config.root_prefix);
        root.use_middleware(middleware.iter().cloned());

        mount_bindings(&root, &bindings, resolver).map_err(|source| StartupError::Route {
            file: file.name.clone(),
            source,
        })?;

        tracing::info!(file = %file.name, routes = table.len(), "Route table built");
        tables.push(table);
    }

    for (index, key) in shadowed_routes(&tables) {
        metrics::record_duplicate_route(&key.method);
        tracing::warn!(
            route = %key,
            file = %files[index].name,
            "Route already served by an earlier table, unreachable"
        );
    }

    Ok(tables)
}

/// Routes mounted in a table but already served by an earlier one, with the
/// index of the shadowed table.
pub fn shadowed_routes(tables: &[Arc<RouteTable>]) -> Vec<(usize, RouteKey)> {
    let served = RouteRegistry::new();
    let mut shadowed = Vec::new();

    for (index, table) in tables.iter().enumerate() {
        for key in table.routes() {
            if !served.claim(&key) {
                shadowed.push((index, key));
            }
        }
    }
    shadowed
}

/// Build the route manifest of every descriptor file, in file order.
///
/// Duplicate keys follow the same registry scope and policy as
/// [`build_tables`].
pub fn build_manifest(
    files: &[FileDescriptor],
    config: &RoutingConfig,
) -> Result<Vec<ManifestEntry>, StartupError> {
    let shared = Arc::new(RouteRegistry::new());
    let mut entries = Vec::new();

    for file in files {
        let bindings = build_file(file).map_err(|source| StartupError::Binding {
            file: file.name.clone(),
            source,
        })?;

        let renderer = ManifestRenderer::with_prefix(config.root_prefix.as_str())
            .with_policy(config.duplicate_policy)
            .with_registry(registry_for(config, &shared));
        entries.extend(
            renderer
                .entries(&bindings)
                .map_err(|source| StartupError::Render {
                    file: file.name.clone(),
                    source,
                })?,
        );
    }

    Ok(entries)
}
