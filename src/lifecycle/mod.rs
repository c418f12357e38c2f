//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Load descriptors → Build bindings → Build route tables
//!     → Report routes shadowed by an earlier table
//!
//! Manifest (startup.rs):
//!     Load descriptors → Build bindings → Manifest entries (same duplicate rules)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then bindings, then tables, listeners last
//! - Fail fast: any construction error is fatal and no table is returned

pub mod startup;

pub use startup::{build_manifest, build_tables, shadowed_routes, StartupError};
