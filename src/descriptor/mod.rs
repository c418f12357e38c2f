//! Descriptor input subsystem.
//!
//! # Data Flow
//! ```text
//! descriptor file (JSON)
//!     → loader.rs (read & deserialize)
//!     → schema.rs (FileDescriptor → ServiceDefinition → MethodDefinition → HttpRule)
//!     → binding subsystem (rule extraction)
//! ```
//!
//! # Design Decisions
//! - The schema mirrors the JSON form of `google.api.HttpRule`; no semantic
//!   checks happen here, the binding subsystem owns them
//! - A file may hold one descriptor or an array of them

pub mod loader;
pub mod schema;

pub use loader::{load_descriptors, parse_descriptors, DescriptorError};
pub use schema::{CustomPattern, FileDescriptor, HttpRule, MethodDefinition, ServiceDefinition};
