//! Error types for tokensmith.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while turning JSON into a token tree.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token document root must be an object, found {found}")]
    RootNotObject { found: String },
}

/// Reference resolution problems.
///
/// These never abort a run: the resolver records them as diagnostics and
/// returns the unresolved reference text in place of a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Circular token reference: {}", .cycle.join(" -> "))]
    CycleDetected { cycle: Vec<String> },

    #[error("Token reference not found: {reference}")]
    ReferenceNotFound { reference: String },
}

/// Per-collection loading failures. The batch skips the collection and moves on.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Collection file not found: {}", .path.display())]
    CollectionMissing { name: String, path: PathBuf },

    #[error("Error processing {name}: {source}")]
    CollectionParse {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("Error reading {}: {source}", .path.display())]
    CollectionRead {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoadError {
    /// Name of the collection that failed.
    pub fn collection(&self) -> &str {
        match self {
            LoadError::CollectionMissing { name, .. }
            | LoadError::CollectionParse { name, .. }
            | LoadError::CollectionRead { name, .. } => name,
        }
    }
}

/// Errors while producing or writing artifacts.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid collection name '{name}': {reason}")]
    InvalidCollectionName { name: String, reason: String },

    #[error("I/O error during export: {0}")]
    Io(#[from] std::io::Error),
}
