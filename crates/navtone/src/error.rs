//! Error types for loading detector configuration and page snapshots.
//!
//! Evaluation passes never fail: missing elements, unparseable colors and
//! unmeasured navigation bars all degrade to "not dark". The only fallible
//! surfaces are the loaders for [`Vocabulary`](crate::Vocabulary),
//! [`DetectorConfig`](crate::DetectorConfig) and [`Snapshot`](crate::Snapshot).

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned when loading a vocabulary or detector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("failed to parse {what}: {source}")]
    Parse {
        /// What was being parsed (`"vocabulary"`, `"detector config"`).
        what: &'static str,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field holds a value the detector cannot work with.
    #[error("invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

/// Errors returned when loading a page [`Snapshot`](crate::Snapshot).
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Invalid YAML snapshot.
    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid JSON snapshot.
    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported snapshot format.
    #[error("unsupported snapshot format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
