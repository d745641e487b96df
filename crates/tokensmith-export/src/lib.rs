//! Artifact generation for design-token collections.
//!
//! Supported artifacts:
//! - CSS custom properties (`:root { --token-...: ...; }`)
//! - TypeScript interfaces describing each collection's shape
//!
//! Each artifact kind is a pluggable [`ArtifactGenerator`]: the batch driver
//! feeds it one collection at a time and asks it to stitch the blocks into a
//! single file at the end.

pub mod css;
pub mod typescript;

pub use css::{render_css_value, CssGenerator, CssOptions};
pub use typescript::{interface_name, ts_type, TypeScriptGenerator, TypeScriptOptions};

use serde::{Deserialize, Serialize};
use std::fmt;
use tokensmith_core::{Diagnostics, ExportError, TokenDocument};

/// Artifact kinds the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Css,
    TypeScript,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 2] = [ArtifactKind::Css, ArtifactKind::TypeScript];

    pub fn name(&self) -> &'static str {
        match self {
            ArtifactKind::Css => "css",
            ArtifactKind::TypeScript => "typescript",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output for one collection within an artifact.
#[derive(Debug, Clone, Default)]
pub struct GeneratedBlock {
    pub collection: String,
    pub content: String,
    /// Reference problems hit while generating this block.
    pub diagnostics: Diagnostics,
}

/// Common trait for artifact generators.
pub trait ArtifactGenerator {
    fn kind(&self) -> ArtifactKind;

    /// Name of the aggregate output file.
    fn file_name(&self) -> &str;

    /// Generate the block for one collection.
    fn generate_collection(
        &self,
        name: &str,
        document: &TokenDocument,
    ) -> Result<GeneratedBlock, ExportError>;

    /// Join collection blocks into the final file, header first.
    fn render_file(&self, blocks: &[GeneratedBlock]) -> String;
}

/// Collection names end up in CSS variable and TypeScript identifiers.
pub fn validate_collection_name(name: &str) -> Result<(), ExportError> {
    if name.is_empty() {
        return Err(ExportError::InvalidCollectionName {
            name: name.to_string(),
            reason: "name is empty".to_string(),
        });
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ExportError::InvalidCollectionName {
            name: name.to_string(),
            reason: format!("unsupported character {:?}", c),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_collection_name() {
        assert!(validate_collection_name("component-specific").is_ok());
        assert!(validate_collection_name("alias_2").is_ok());
        assert!(validate_collection_name("").is_err());
        assert!(matches!(
            validate_collection_name("a b"),
            Err(ExportError::InvalidCollectionName { .. })
        ));
    }

    #[test]
    fn test_artifact_kind_names() {
        assert_eq!(ArtifactKind::Css.to_string(), "css");
        assert_eq!(ArtifactKind::TypeScript.name(), "typescript");
    }
}
