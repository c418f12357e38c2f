//! Shared duplicate-route registry.
//!
//! # Responsibilities
//! - Record every `METHOD pattern` key claimed by a route tree
//! - Answer "already taken?" atomically with the claim
//!
//! # Design Decisions
//! - Shared by handle (`Arc`), never copied: every group of a tree, and any
//!   table the integrator hands the same registry, sees the same keys
//! - Backed by `DashSet` so a claim is a single atomic insert

use std::fmt;

use dashmap::DashSet;

/// Identity of a route: method token plus fully-prefixed pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: String,
    pub pattern: String,
}

impl RouteKey {
    pub fn new(method: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            pattern: pattern.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}

/// Set of claimed route keys.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    keys: DashSet<String>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`. Returns false when it was already claimed.
    pub fn claim(&self, key: &RouteKey) -> bool {
        self.keys.insert(key.to_string())
    }

    pub fn contains(&self, key: &RouteKey) -> bool {
        self.keys.contains(&key.to_string())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
