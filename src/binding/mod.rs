//! HTTP binding extraction subsystem.
//!
//! # Data Flow
//! ```text
//! FileDescriptor
//!     → extractor.rs (syntax variant → strategy, per-method rule extraction)
//!         → rule.rs (verb resolution, normalization)
//!             → pattern.rs (path parameter extraction)
//!     → builder.rs (drop empty methods/services)
//!     → Vec<ServiceBinding>
//! ```
//!
//! # Design Decisions
//! - Pure transformation over already-loaded descriptors: no I/O, no shared state
//! - Missing annotations and malformed custom verbs degrade to "no rule"
//! - Structurally invalid annotations fail the whole build

pub mod builder;
pub mod extractor;
pub mod pattern;
pub mod rule;

use thiserror::Error;

pub use builder::{build_file, MethodBinding, ServiceBinding, ServiceBindingBuilder};
pub use extractor::{
    extract_rules, strategy_for, AnnotationStrategy, BindingStrategy, SyntaxVariant,
};
pub use pattern::extract_params;
pub use rule::{normalize, BodySelector, Rule, Verb};

/// Errors raised while extracting bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// More than one member of the HTTP pattern oneof is set.
    #[error("method `{method}` sets more than one HTTP pattern ({})", members.join(", "))]
    ConflictingPatterns {
        method: String,
        members: Vec<&'static str>,
    },

    /// An error located in a specific service.
    #[error("service `{service}`: {source}")]
    InService {
        service: String,
        #[source]
        source: Box<BindingError>,
    },
}

impl BindingError {
    /// Attach the enclosing service name.
    pub fn in_service(self, service: &str) -> Self {
        BindingError::InService {
            service: service.to_string(),
            source: Box::new(self),
        }
    }
}
