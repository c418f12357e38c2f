//! Service binding tree construction.
//!
//! # Responsibilities
//! - Run rule extraction over every method of every service
//! - Drop methods without rules, then services without methods
//! - Attach the service name to extraction failures
//!
//! # Design Decisions
//! - Output order follows declaration order only (no map iteration)
//! - Fails fast: the first invalid method aborts the whole build

use serde::Serialize;

use crate::binding::extractor::{strategy_for, BindingStrategy, SyntaxVariant};
use crate::binding::rule::Rule;
use crate::binding::BindingError;
use crate::descriptor::{FileDescriptor, ServiceDefinition};

/// A method and its ordered rules (primary first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodBinding {
    pub name: String,
    pub rules: Vec<Rule>,
}

/// A service and the methods that carry at least one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceBinding {
    pub name: String,
    pub methods: Vec<MethodBinding>,
}

impl ServiceBinding {
    /// Total number of rules across all methods.
    pub fn rule_count(&self) -> usize {
        self.methods.iter().map(|m| m.rules.len()).sum()
    }
}

/// Builds [`ServiceBinding`] trees with a variant-specific strategy.
#[derive(Debug)]
pub struct ServiceBindingBuilder {
    strategy: Box<dyn BindingStrategy>,
}

impl ServiceBindingBuilder {
    pub fn new(variant: SyntaxVariant) -> Self {
        Self {
            strategy: strategy_for(variant),
        }
    }

    /// Builder for the syntax variant declared by `file`.
    pub fn for_file(file: &FileDescriptor) -> Self {
        Self::new(SyntaxVariant::of_file(file))
    }

    pub fn variant(&self) -> SyntaxVariant {
        self.strategy.variant()
    }

    pub fn build(
        &self,
        services: &[ServiceDefinition],
    ) -> Result<Vec<ServiceBinding>, BindingError> {
        let mut bindings = Vec::new();

        for service in services {
            let mut methods = Vec::new();
            for method in &service.methods {
                let rules = self
                    .strategy
                    .extract(method)
                    .map_err(|e| e.in_service(&service.name))?;

                if rules.is_empty() {
                    tracing::debug!(
                        service = %service.name,
                        method = %method.name,
                        "Method has no HTTP binding, skipping"
                    );
                    continue;
                }
                methods.push(MethodBinding {
                    name: method.name.clone(),
                    rules,
                });
            }

            if methods.is_empty() {
                tracing::debug!(service = %service.name, "Service has no HTTP bindings, skipping");
                continue;
            }
            bindings.push(ServiceBinding {
                name: service.name.clone(),
                methods,
            });
        }

        Ok(bindings)
    }
}

/// Build the bindings of one descriptor file.
pub fn build_file(file: &FileDescriptor) -> Result<Vec<ServiceBinding>, BindingError> {
    let builder = ServiceBindingBuilder::for_file(file);
    let bindings = builder.build(&file.services)?;

    tracing::info!(
        file = %file.name,
        variant = %builder.variant(),
        services = bindings.len(),
        rules = bindings.iter().map(ServiceBinding::rule_count).sum::<usize>(),
        "Service bindings built"
    );
    Ok(bindings)
}
