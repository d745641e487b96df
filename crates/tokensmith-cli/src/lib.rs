//! Batch driver for the `tokensmith` command.
//!
//! Reads the configured token collections, runs the CSS and TypeScript
//! generators over each one, and writes the aggregate files.
//!
//! # Example
//!
//! ```ignore
//! use tokensmith_cli::{run, GeneratorConfig};
//! use tokensmith_export::ArtifactKind;
//!
//! let config = GeneratorConfig::default().with_tokens_dir("design/tokens");
//! let report = run(&config, &ArtifactKind::ALL)?;
//! println!("{} collections generated", report.generated.len());
//! ```

pub mod batch;
pub mod config;

pub use batch::{
    generate, generator_for, load_collection, run, write_artifacts, Artifact, BatchOutput,
    BatchReport, SkippedCollection,
};
pub use config::{default_collections, CollectionSpec, ConfigError, GeneratorConfig};
