//! Error types

use std::path::PathBuf;

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog text is not a valid nested entry list.
    #[error("Catalog parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A script was given but it contains no `[...]` tree literal.
    #[error("No tree literal found in catalog script")]
    MissingTree,

    /// An entry has an empty label.
    #[error("Entry at {path:?} has an empty label")]
    EmptyLabel {
        /// Breadcrumb path of the offending entry.
        path: Vec<usize>,
    },
}

impl CatalogError {
    /// Creates a new I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while loading a [`NavTreeConfig`](crate::NavTreeConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the config schema.
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
