//! Mounting service bindings onto a route group.
//!
//! # Responsibilities
//! - Ask a [`HandlerResolver`] for the handler of each bound method
//! - Register every rule of that method against the same handler
//!
//! # Design Decisions
//! - Two-phase: every key and handler is checked before anything is
//!   registered, so a rejected tree leaves the table untouched
//! - Under the warn policy duplicates are reported, not fatal

use std::collections::HashSet;

use crate::binding::{MethodBinding, ServiceBinding};
use crate::observability::metrics;
use crate::routing::group::RouteGroup;
use crate::routing::middleware::Handler;
use crate::routing::registry::RouteKey;
use crate::routing::table::{DuplicatePolicy, Registration};
use crate::routing::RouteError;

/// Supplies the handler implementing a bound method.
pub trait HandlerResolver {
    fn resolve(&self, service: &str, method: &MethodBinding) -> Option<Handler>;
}

impl<F> HandlerResolver for F
where
    F: Fn(&str, &MethodBinding) -> Option<Handler>,
{
    fn resolve(&self, service: &str, method: &MethodBinding) -> Option<Handler> {
        self(service, method)
    }
}

/// Summary of a mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountReport {
    pub mounted: Vec<RouteKey>,
    pub ignored: Vec<RouteKey>,
}

struct Planned<'a> {
    method: &'a str,
    pattern: &'a str,
    handler: Handler,
}

/// Register all rules of `bindings` on `group`.
pub fn mount_bindings<R>(
    group: &RouteGroup,
    bindings: &[ServiceBinding],
    resolver: &R,
) -> Result<MountReport, RouteError>
where
    R: HandlerResolver + ?Sized,
{
    let reject = group.table().policy() == DuplicatePolicy::Reject;
    let mut seen = HashSet::new();
    let mut plan = Vec::new();

    for service in bindings {
        for method in &service.methods {
            let handler = resolver.resolve(&service.name, method).ok_or_else(|| {
                RouteError::MissingHandler {
                    service: service.name.clone(),
                    method: method.name.clone(),
                }
            })?;

            for rule in &method.rules {
                let key = group.route_key(rule.method(), rule.pattern())?;
                let taken = group.table().registry().contains(&key) || !seen.insert(key.clone());
                if taken && reject {
                    metrics::record_duplicate_route(&key.method);
                    return Err(RouteError::DuplicateRoute { key });
                }
                plan.push(Planned {
                    method: rule.method(),
                    pattern: rule.pattern(),
                    handler: handler.clone(),
                });
            }
        }
    }

    let mut report = MountReport::default();
    for planned in plan {
        match group.route(planned.method, planned.pattern, planned.handler)? {
            Registration::Mounted(key) => report.mounted.push(key),
            Registration::Ignored(key) => report.ignored.push(key),
        }
    }

    tracing::info!(
        prefix = %group.prefix(),
        mounted = report.mounted.len(),
        ignored = report.ignored.len(),
        "Service bindings mounted"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Rule;
    use crate::observability::metrics::testing::CountingRecorder;
    use crate::observability::metrics::DUPLICATE_ROUTES;
    use crate::routing::table::RouteTable;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::sync::Arc;

    fn binding(service: &str, methods: Vec<(&str, Vec<(&str, &str)>)>) -> ServiceBinding {
        ServiceBinding {
            name: service.into(),
            methods: methods
                .into_iter()
                .map(|(name, rules)| MethodBinding {
                    name: name.into(),
                    rules: rules.into_iter().map(|(m, p)| Rule::new(m, p, "")).collect(),
                })
                .collect(),
        }
    }

    fn any_handler(_service: &str, _method: &MethodBinding) -> Option<Handler> {
        Some(Handler::from_fn(|_req| async { StatusCode::OK.into_response() }))
    }

    #[test]
    fn test_mounts_every_rule() {
        let group = RouteGroup::with_prefix(Arc::new(RouteTable::new()), "/api");
        let bindings = [binding(
            "users.Users",
            vec![
                ("Update", vec![("PUT", "/users/{id}"), ("PATCH", "/users/{id}")]),
                ("Get", vec![("GET", "/users/{id}")]),
            ],
        )];

        let report = mount_bindings(&group, &bindings, &any_handler).unwrap();
        assert_eq!(report.mounted.len(), 3);
        assert!(report.ignored.is_empty());
        assert_eq!(report.mounted[0], RouteKey::new("PUT", "/api/users/{id}"));
    }

    #[test]
    fn test_duplicate_leaves_table_untouched() {
        let group = RouteGroup::root(Arc::new(RouteTable::new()));
        let bindings = [
            binding("a.A", vec![("Get", vec![("GET", "/x")])]),
            binding("b.B", vec![("Get", vec![("GET", "/x")])]),
        ];

        let recorder = CountingRecorder::default();
        let err = ::metrics::with_local_recorder(&recorder, || {
            mount_bindings(&group, &bindings, &any_handler)
        })
        .unwrap_err();
        assert!(matches!(err, RouteError::DuplicateRoute { .. }));
        assert!(group.table().is_empty());
        assert!(group.table().registry().is_empty());
        assert_eq!(recorder.count(DUPLICATE_ROUTES), 1);
    }

    #[test]
    fn test_missing_handler() {
        let group = RouteGroup::root(Arc::new(RouteTable::new()));
        let bindings = [binding("a.A", vec![("Get", vec![("GET", "/x")])])];
        let none = |_: &str, _: &MethodBinding| -> Option<Handler> { None };

        let err = mount_bindings(&group, &bindings, &none).unwrap_err();
        assert_eq!(err.to_string(), "no handler for a.A.Get");
        assert!(group.table().is_empty());
    }

    #[test]
    fn test_warn_policy_reports_ignored() {
        let table = Arc::new(RouteTable::new().with_policy(DuplicatePolicy::Warn));
        let group = RouteGroup::root(table);
        let bindings = [binding(
            "a.A",
            vec![("Get", vec![("GET", "/x")]), ("Again", vec![("GET", "/x")])],
        )];

        let report = mount_bindings(&group, &bindings, &any_handler).unwrap();
        assert_eq!(report.mounted, [RouteKey::new("GET", "/x")]);
        assert_eq!(report.ignored, [RouteKey::new("GET", "/x")]);
    }
}
