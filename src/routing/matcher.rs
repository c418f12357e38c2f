//! Path template matching.
//!
//! # Responsibilities
//! - Compile a route pattern (`/v1/{name}:cancel`) into an anchored matcher
//! - Match concrete request paths and capture placeholder values by name
//!
//! # Design Decisions
//! - A placeholder matches exactly one non-empty path segment
//! - Literal text around placeholders (custom verb suffixes) must match exactly
//! - Matching is case-sensitive

use regex::Regex;

use crate::binding::pattern::PLACEHOLDER;
use crate::routing::RouteError;

/// Captured path parameter values, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    pattern: String,
    names: Vec<String>,
    regex: Regex,
}

impl PathTemplate {
    pub fn compile(pattern: &str) -> Result<Self, RouteError> {
        let mut expr = String::with_capacity(pattern.len() + 8);
        let mut names = Vec::new();
        let mut last = 0;

        expr.push('^');
        for caps in PLACEHOLDER.captures_iter(pattern) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            expr.push_str(&regex::escape(&pattern[last..whole.start()]));
            expr.push_str("([^/]+)");
            names.push(name.as_str().to_string());
            last = whole.end();
        }
        expr.push_str(&regex::escape(&pattern[last..]));
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|e| RouteError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            names,
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Match a request path, returning captured parameters on success.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let caps = self.regex.captures(path)?;
        let values = self
            .names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                caps.get(i + 1)
                    .map(|m| (name.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(PathParams(values))
    }
}
