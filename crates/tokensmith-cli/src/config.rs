//! Generator configuration.
//!
//! Every field has a default, so an empty `{}` file (or no file at all)
//! reproduces the standard four-collection layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokensmith_export::{CssOptions, TypeScriptOptions};

/// Errors loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One named collection and its source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    /// Path relative to `tokens_dir`.
    pub file: PathBuf,
    /// Name used for TypeScript interfaces, if different from `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

impl CollectionSpec {
    /// A collection stored at `<name>/index.json`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            file: Path::new(&name).join("index.json"),
            name,
            type_name: None,
        }
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or(&self.name)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub tokens_dir: PathBuf,
    pub output_dir: PathBuf,
    pub collections: Vec<CollectionSpec>,
    pub css: CssOptions,
    pub typescript: TypeScriptOptions,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tokens_dir: PathBuf::from("tokens"),
            output_dir: PathBuf::from("dist"),
            collections: default_collections(),
            css: CssOptions::default(),
            typescript: TypeScriptOptions::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn with_tokens_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tokens_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_collections(mut self, collections: Vec<CollectionSpec>) -> Self {
        self.collections = collections;
        self
    }

    /// Source path of a collection.
    pub fn collection_path(&self, collection: &CollectionSpec) -> PathBuf {
        self.tokens_dir.join(&collection.file)
    }
}

/// `primitive`, `alias`, `component-specific`, `universal`.
pub fn default_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new("primitive"),
        CollectionSpec::new("alias"),
        CollectionSpec::new("component-specific").with_type_name("component"),
        CollectionSpec::new("universal"),
    ]
}
