//! Descriptor schema definitions.
//!
//! These types carry the already-materialized service metadata: one
//! `FileDescriptor` per source file, its services and their methods, and the
//! HTTP annotation attached to each method.

use serde::{Deserialize, Deserializer, Serialize};

/// One source file worth of service definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileDescriptor {
    /// Source file name, for diagnostics.
    pub name: String,

    /// Declared syntax marker (`proto2`, `proto3`, `editions`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,

    /// Explicit edition marker (e.g. `2023`). Takes priority over `syntax`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,

    /// Services in declaration order.
    pub services: Vec<ServiceDefinition>,
}

/// An RPC service and its methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceDefinition {
    /// Fully-qualified service name.
    pub name: String,

    /// Methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodDefinition>,
}

/// An RPC method with its optional HTTP annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MethodDefinition {
    pub name: String,

    /// Primary HTTP binding, absent when the method is not exposed over HTTP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpRule>,
}

/// HTTP binding annotation.
///
/// `get`, `put`, `post`, `delete`, `patch` and `custom` form a oneof: a
/// well-formed rule sets at most one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,

    /// Custom verb. The outer `Option` records whether the member is set at
    /// all; the inner one is `None` when it was declared without a payload
    /// (`"custom": null`).
    #[serde(
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom: Option<Option<CustomPattern>>,

    /// Body selector: `""`, `"*"` or a field path.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,

    /// Extra bindings mapped to the same method.
    #[serde(alias = "additionalBindings", skip_serializing_if = "Vec::is_empty")]
    pub additional_bindings: Vec<HttpRule>,
}

impl HttpRule {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            get: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self {
            put: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            post: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            delete: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self {
            patch: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn custom(kind: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            custom: Some(Some(CustomPattern {
                kind: kind.into(),
                path: path.into(),
            })),
            ..Self::default()
        }
    }

    /// Set the body selector.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append an additional binding.
    pub fn with_additional(mut self, binding: HttpRule) -> Self {
        self.additional_bindings.push(binding);
        self
    }
}

/// Custom verb payload: a verb token plus a path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CustomPattern {
    pub kind: String,
    pub path: String,
}

/// Maps a present field to `Some(..)` even when its value is `null`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
