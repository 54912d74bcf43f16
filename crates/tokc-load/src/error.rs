//! Error types for source loading.

use std::path::PathBuf;

/// Errors that stop a source from loading at all.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Source file not found.
    #[error("token source not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// One or more required sources are absent.
    #[error("missing required token sources: {}", list_paths(paths))]
    MissingSources {
        /// Every missing path, in the order they were requested.
        paths: Vec<PathBuf>,
    },

    /// I/O error reading a source or listing a directory.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not syntactically valid JSON.
    #[error("JSON parse error in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

fn list_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
