use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokensmith_cli::{run, GeneratorConfig};
use tokensmith_export::ArtifactKind;
use tracing_subscriber::EnvFilter;

/// Generate CSS custom properties and TypeScript types from design tokens.
#[derive(Debug, Parser)]
#[command(name = "tokensmith", version)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the collection files.
    #[arg(long)]
    tokens_dir: Option<PathBuf>,

    /// Directory the generated files are written to.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Which artifact to generate.
    #[arg(long, value_enum, default_value_t = ArtifactArg::All)]
    artifact: ArtifactArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArtifactArg {
    Css,
    Typescript,
    All,
}

impl ArtifactArg {
    fn kinds(self) -> Vec<ArtifactKind> {
        match self {
            ArtifactArg::Css => vec![ArtifactKind::Css],
            ArtifactArg::Typescript => vec![ArtifactKind::TypeScript],
            ArtifactArg::All => ArtifactKind::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(dir) = cli.tokens_dir {
        config.tokens_dir = dir;
    }
    if let Some(dir) = cli.out_dir {
        config.output_dir = dir;
    }

    let report = run(&config, &cli.artifact.kinds()).with_context(|| {
        format!("failed to write generated files to {}", config.output_dir.display())
    })?;

    if !report.skipped.is_empty() {
        let names: Vec<&str> = report.skipped.iter().map(|s| s.name.as_str()).collect();
        tracing::warn!("skipped collections: {}", names.join(", "));
    }
    if !report.diagnostics.is_empty() {
        tracing::warn!(
            "{} unresolved token references ({} circular)",
            report.diagnostics.len(),
            report.diagnostics.cycles()
        );
    }

    Ok(())
}

fn init_logging() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
