//! Rule extraction from method annotations.
//!
//! # Responsibilities
//! - Resolve the HTTP pattern oneof of each binding into a [`Verb`]
//! - Emit the primary binding first, then additional bindings in order
//! - Drop unbound rules (no annotation, malformed custom verb)
//! - Select an extraction strategy from the file's syntax metadata
//!
//! # Design Decisions
//! - One shared implementation serves every syntax variant today; the
//!   [`BindingStrategy`] trait is where a variant can diverge later
//! - Setting two members of the pattern oneof is structurally invalid and
//!   is the only failure extraction reports

use std::fmt;

use crate::binding::rule::{normalize, Rule, Verb};
use crate::binding::BindingError;
use crate::descriptor::{FileDescriptor, HttpRule, MethodDefinition};

/// Metadata syntax that produced a descriptor file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxVariant {
    Proto2,
    Proto3,
    Editions,
}

impl SyntaxVariant {
    /// Resolve the variant of a file.
    ///
    /// An explicit edition marker wins over the declared syntax, which wins
    /// over the default (`proto2`, as when no syntax is declared).
    pub fn of_file(file: &FileDescriptor) -> Self {
        if file.edition.as_deref().is_some_and(|e| !e.is_empty()) {
            return SyntaxVariant::Editions;
        }
        match file.syntax.as_deref() {
            Some("editions") => SyntaxVariant::Editions,
            Some("proto3") => SyntaxVariant::Proto3,
            Some("proto2") | Some("") | None => SyntaxVariant::Proto2,
            Some(other) => {
                tracing::debug!(
                    file = %file.name,
                    syntax = other,
                    "Unknown syntax marker, using proto2"
                );
                SyntaxVariant::Proto2
            }
        }
    }
}

impl fmt::Display for SyntaxVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyntaxVariant::Proto2 => "proto2",
            SyntaxVariant::Proto3 => "proto3",
            SyntaxVariant::Editions => "editions",
        };
        f.write_str(name)
    }
}

/// Per-syntax extraction strategy.
pub trait BindingStrategy: Send + Sync + fmt::Debug {
    /// The variant this strategy serves.
    fn variant(&self) -> SyntaxVariant;

    /// Extract the ordered rules of one method.
    fn extract(&self, method: &MethodDefinition) -> Result<Vec<Rule>, BindingError>;
}

/// Annotation-driven extraction shared by all current variants.
#[derive(Debug, Clone, Copy)]
pub struct AnnotationStrategy {
    variant: SyntaxVariant,
}

impl AnnotationStrategy {
    pub fn new(variant: SyntaxVariant) -> Self {
        Self { variant }
    }
}

impl BindingStrategy for AnnotationStrategy {
    fn variant(&self) -> SyntaxVariant {
        self.variant
    }

    fn extract(&self, method: &MethodDefinition) -> Result<Vec<Rule>, BindingError> {
        extract_rules(method)
    }
}

/// Select the strategy for a syntax variant.
pub fn strategy_for(variant: SyntaxVariant) -> Box<dyn BindingStrategy> {
    match variant {
        SyntaxVariant::Proto2 | SyntaxVariant::Proto3 | SyntaxVariant::Editions => {
            Box::new(AnnotationStrategy::new(variant))
        }
    }
}

/// Extract the rules of `method`: primary binding, then additional bindings.
pub fn extract_rules(method: &MethodDefinition) -> Result<Vec<Rule>, BindingError> {
    let Some(http) = &method.http else {
        return Ok(Vec::new());
    };

    let mut rules = Vec::with_capacity(1 + http.additional_bindings.len());
    push_bound(&mut rules, &method.name, http)?;

    for binding in &http.additional_bindings {
        if !binding.additional_bindings.is_empty() {
            tracing::warn!(
                method = %method.name,
                nested = binding.additional_bindings.len(),
                "Nested additional bindings are only honoured at the top level, ignoring"
            );
        }
        push_bound(&mut rules, &method.name, binding)?;
    }

    Ok(rules)
}

fn push_bound(rules: &mut Vec<Rule>, method: &str, http: &HttpRule) -> Result<(), BindingError> {
    if let Some((verb, pattern)) = resolve_verb(method, http)? {
        let rule = normalize(&verb, pattern, &http.body);
        if rule.is_bound() {
            rules.push(rule);
        } else {
            tracing::debug!(method, "Dropping unbound rule");
        }
    }
    Ok(())
}

/// Resolve the pattern oneof. `None` when no member is set.
fn resolve_verb<'a>(
    method: &str,
    http: &'a HttpRule,
) -> Result<Option<(Verb, &'a str)>, BindingError> {
    let standard = [
        ("get", Verb::Get, &http.get),
        ("put", Verb::Put, &http.put),
        ("post", Verb::Post, &http.post),
        ("delete", Verb::Delete, &http.delete),
        ("patch", Verb::Patch, &http.patch),
    ];

    let mut members: Vec<(&'static str, Verb, &'a str)> = Vec::new();
    for (name, verb, path) in standard {
        if let Some(path) = path {
            members.push((name, verb, path.as_str()));
        }
    }
    if let Some(custom) = &http.custom {
        members.push(("custom", Verb::Custom(custom.clone()), ""));
    }

    if members.len() > 1 {
        return Err(BindingError::ConflictingPatterns {
            method: method.to_string(),
            members: members.iter().map(|(name, _, _)| *name).collect(),
        });
    }

    Ok(members.pop().map(|(_, verb, path)| (verb, path)))
}
