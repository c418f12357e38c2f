//! Descriptor loading from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::descriptor::schema::FileDescriptor;

/// Errors raised while reading descriptor files.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read descriptor file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse descriptor file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DescriptorDocument {
    Many(Vec<FileDescriptor>),
    One(FileDescriptor),
}

/// Parse a JSON document holding one descriptor or an array of them.
pub fn parse_descriptors(json: &str) -> Result<Vec<FileDescriptor>, serde_json::Error> {
    let files = match serde_json::from_str(json)? {
        DescriptorDocument::Many(files) => files,
        DescriptorDocument::One(file) => vec![file],
    };
    Ok(files)
}

/// Load descriptors from a JSON file.
pub fn load_descriptors(path: &Path) -> Result<Vec<FileDescriptor>, DescriptorError> {
    let content = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let files = parse_descriptors(&content).map_err(|source| DescriptorError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), files = files.len(), "Descriptors loaded");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE: &str = r#"{
        "name": "shop.proto",
        "syntax": "proto3",
        "services": [{
            "name": "shop.Catalog",
            "methods": [
                {"name": "GetProduct", "http": {"get": "/products/{product_id}"}},
                {"name": "Ping"}
            ]
        }]
    }"#;

    #[test]
    fn test_parse_single_document() {
        let files = parse_descriptors(SINGLE).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].syntax.as_deref(), Some("proto3"));
        assert_eq!(files[0].services[0].methods.len(), 2);
        assert!(files[0].services[0].methods[1].http.is_none());
    }

    #[test]
    fn test_parse_array_document() {
        let json = format!("[{SINGLE}, {{\"name\": \"empty.proto\"}}]");
        let files = parse_descriptors(&json).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].name, "empty.proto");
        assert!(files[1].services.is_empty());
    }

    #[test]
    fn test_load_reports_path_on_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_descriptors(&path).unwrap_err();
        assert!(matches!(err, DescriptorError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));

        let missing = load_descriptors(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, DescriptorError::Io { .. }));
    }
}
