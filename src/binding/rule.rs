//! Canonical HTTP rules and binding normalization.
//!
//! # Responsibilities
//! - Resolve a verb (standard or custom) to its method token
//! - Pair it with the resolved pattern and body selector
//! - Derive path parameters from the pattern, never from caller data
//!
//! # Design Decisions
//! - A custom verb without kind or path degrades to an unbound rule instead
//!   of an error; extraction drops unbound rules
//! - Custom tokens are kept verbatim (`MERGE`, `PURGE`, ...)

use std::fmt;

use serde::Serialize;

use crate::binding::pattern::extract_params;
use crate::descriptor::CustomPattern;

/// HTTP verb of a binding annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    /// Custom verb; `None` when declared without a payload.
    Custom(Option<CustomPattern>),
}

impl Verb {
    /// Uppercase token for standard verbs, `None` for custom ones.
    pub fn standard_token(&self) -> Option<&'static str> {
        match self {
            Verb::Get => Some("GET"),
            Verb::Put => Some("PUT"),
            Verb::Post => Some("POST"),
            Verb::Delete => Some("DELETE"),
            Verb::Patch => Some("PATCH"),
            Verb::Custom(_) => None,
        }
    }
}

/// Which part of the request maps to the HTTP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySelector<'a> {
    /// No body.
    None,
    /// The whole request message.
    Whole,
    /// A single (possibly nested) field.
    Field(&'a str),
}

/// One concrete HTTP binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rule {
    method: String,
    pattern: String,
    body: String,
    path_params: Vec<String>,
}

impl Rule {
    /// Create a rule; path parameters are derived from `pattern`.
    pub fn new(
        method: impl Into<String>,
        pattern: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let pattern = pattern.into();
        let path_params = extract_params(&pattern);
        Self {
            method: method.into(),
            pattern,
            body: body.into(),
            path_params,
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    pub fn body_selector(&self) -> BodySelector<'_> {
        match self.body.as_str() {
            "" => BodySelector::None,
            "*" => BodySelector::Whole,
            field => BodySelector::Field(field),
        }
    }

    /// False for the empty rule produced by a malformed binding.
    pub fn is_bound(&self) -> bool {
        !self.method.is_empty()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}

/// Normalize one binding annotation into a [`Rule`].
///
/// For custom verbs the pattern comes from the custom payload and
/// `raw_pattern` is ignored.
pub fn normalize(verb: &Verb, raw_pattern: &str, raw_body: &str) -> Rule {
    if let Some(token) = verb.standard_token() {
        return Rule::new(token, raw_pattern, raw_body);
    }

    match verb {
        Verb::Custom(Some(custom)) if !custom.kind.is_empty() && !custom.path.is_empty() => {
            Rule::new(custom.kind.as_str(), custom.path.as_str(), raw_body)
        }
        _ => {
            tracing::debug!(?verb, "Custom binding without kind or path, ignoring");
            Rule::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_verbs() {
        let cases = [
            (Verb::Get, "GET"),
            (Verb::Put, "PUT"),
            (Verb::Post, "POST"),
            (Verb::Delete, "DELETE"),
            (Verb::Patch, "PATCH"),
        ];
        for (verb, token) in cases {
            let rule = normalize(&verb, "/items/{id}", "");
            assert_eq!(rule.method(), token);
            assert_eq!(rule.pattern(), "/items/{id}");
            assert_eq!(rule.path_params(), ["id"]);
        }
    }

    #[test]
    fn test_custom_verb() {
        let verb = Verb::Custom(Some(CustomPattern {
            kind: "PURGE".into(),
            path: "/cache/{key.hash}".into(),
        }));
        let rule = normalize(&verb, "ignored", "*");
        assert_eq!(rule.method(), "PURGE");
        assert_eq!(rule.pattern(), "/cache/{key.hash}");
        assert_eq!(rule.path_params(), ["key.hash"]);
        assert_eq!(rule.body_selector(), BodySelector::Whole);
    }

    #[test]
    fn test_custom_without_payload_is_unbound() {
        let rule = normalize(&Verb::Custom(None), "/x", "body");
        assert_eq!(rule, Rule::default());
        assert!(!rule.is_bound());
        assert!(rule.path_params().is_empty());
    }

    #[test]
    fn test_custom_with_partial_payload_is_unbound() {
        let no_path = Verb::Custom(Some(CustomPattern {
            kind: "HEAD".into(),
            path: String::new(),
        }));
        assert!(!normalize(&no_path, "", "").is_bound());

        let no_kind = Verb::Custom(Some(CustomPattern {
            kind: String::new(),
            path: "/a".into(),
        }));
        assert!(!normalize(&no_kind, "", "").is_bound());
    }

    #[test]
    fn test_body_selector() {
        assert_eq!(Rule::new("POST", "/a", "").body_selector(), BodySelector::None);
        assert_eq!(Rule::new("POST", "/a", "*").body_selector(), BodySelector::Whole);
        assert_eq!(
            Rule::new("POST", "/a", "item.data").body_selector(),
            BodySelector::Field("item.data")
        );
    }
}
