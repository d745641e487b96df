//! Batch generation over all configured collections.
//!
//! Collections are processed one at a time: each file is loaded, handed to
//! every requested generator, and dropped before the next one is read. A
//! missing or malformed collection is logged and skipped; only failing to
//! write an output file aborts the run.

use std::path::{Path, PathBuf};
use tokensmith_core::{Diagnostics, ExportError, LoadError, TokenDocument};
use tokensmith_export::{
    ArtifactGenerator, ArtifactKind, CssGenerator, GeneratedBlock, TypeScriptGenerator,
};

use crate::config::{CollectionSpec, GeneratorConfig};

/// A rendered output file, not yet written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub file_name: String,
    pub content: String,
}

/// A collection left out of one or all artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCollection {
    pub name: String,
    /// `None` when the collection could not be loaded at all.
    pub kind: Option<ArtifactKind>,
    pub reason: String,
}

/// What happened during a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Collections that made it into at least one artifact, in processing order.
    pub generated: Vec<String>,
    pub skipped: Vec<SkippedCollection>,
    pub diagnostics: Diagnostics,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub artifacts: Vec<Artifact>,
    pub report: BatchReport,
}

/// Read and parse one collection file.
pub fn load_collection(
    config: &GeneratorConfig,
    collection: &CollectionSpec,
) -> Result<TokenDocument, LoadError> {
    let path = config.collection_path(collection);
    if !path.exists() {
        return Err(LoadError::CollectionMissing {
            name: collection.name.clone(),
            path,
        });
    }

    let source = std::fs::read_to_string(&path).map_err(|source| LoadError::CollectionRead {
        name: collection.name.clone(),
        path: path.clone(),
        source,
    })?;

    tokensmith_parser::parse_document(&source).map_err(|source| LoadError::CollectionParse {
        name: collection.name.clone(),
        source,
    })
}

/// Build the generator for an artifact kind from config.
pub fn generator_for(config: &GeneratorConfig, kind: ArtifactKind) -> Box<dyn ArtifactGenerator> {
    match kind {
        ArtifactKind::Css => Box::new(CssGenerator::with_options(config.css.clone())),
        ArtifactKind::TypeScript => {
            Box::new(TypeScriptGenerator::with_options(config.typescript.clone()))
        }
    }
}

/// Generate all requested artifacts in memory.
pub fn generate(config: &GeneratorConfig, kinds: &[ArtifactKind]) -> BatchOutput {
    let generators: Vec<Box<dyn ArtifactGenerator>> =
        kinds.iter().map(|kind| generator_for(config, *kind)).collect();
    let mut blocks: Vec<Vec<GeneratedBlock>> = generators.iter().map(|_| Vec::new()).collect();
    let mut report = BatchReport::default();

    for collection in &config.collections {
        let document = match load_collection(config, collection) {
            Ok(document) => document,
            Err(err) => {
                match err {
                    LoadError::CollectionMissing { .. } => tracing::warn!("{}", err),
                    _ => tracing::error!("{}", err),
                }
                report.skipped.push(SkippedCollection {
                    name: collection.name.clone(),
                    kind: None,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let mut produced = false;
        for (generator, out) in generators.iter().zip(blocks.iter_mut()) {
            let name = match generator.kind() {
                ArtifactKind::Css => collection.name.as_str(),
                ArtifactKind::TypeScript => collection.type_name(),
            };

            match generator.generate_collection(name, &document) {
                Ok(mut block) => {
                    report.diagnostics.extend(std::mem::take(&mut block.diagnostics));
                    out.push(block);
                    produced = true;
                    tracing::info!("✓ Generated {} for {} collection", generator.kind(), name);
                }
                Err(err) => {
                    tracing::error!("Error processing {}: {}", collection.name, err);
                    report.skipped.push(SkippedCollection {
                        name: collection.name.clone(),
                        kind: Some(generator.kind()),
                        reason: err.to_string(),
                    });
                }
            }
        }

        if produced {
            report.generated.push(collection.name.clone());
        }
    }

    let artifacts = generators
        .iter()
        .zip(blocks)
        .map(|(generator, blocks)| Artifact {
            kind: generator.kind(),
            file_name: generator.file_name().to_string(),
            content: generator.render_file(&blocks),
        })
        .collect();

    BatchOutput { artifacts, report }
}

/// Write artifacts into `output_dir`, creating it if needed.
pub fn write_artifacts(output_dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(&artifact.file_name);
        std::fs::write(&path, &artifact.content)?;
        tracing::info!("✓ Generated {} output: {}", artifact.kind, path.display());
        written.push(path);
    }
    Ok(written)
}

/// Generate and write all requested artifacts.
pub fn run(config: &GeneratorConfig, kinds: &[ArtifactKind]) -> Result<BatchReport, ExportError> {
    let output = generate(config, kinds);
    write_artifacts(&config.output_dir, &output.artifacts)?;
    Ok(output.report)
}
