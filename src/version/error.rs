use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("Invalid namespace {namespace:?}: {reason}")]
    InvalidNamespace { namespace: String, reason: String },
}

impl VersionError {
    pub(crate) fn invalid_namespace(namespace: &str, reason: impl Into<String>) -> Self {
        Self::InvalidNamespace {
            namespace: namespace.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failures while reading a descriptor resource.
///
/// These never reach the resolver: loaders collapse them into "no descriptor".
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Descriptor not found: {0}")]
    NotFound(String),

    #[error("Failed to read descriptor {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
