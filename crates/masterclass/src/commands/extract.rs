//! Example extraction command.

use anyhow::{Context, Result};
use masterclass_catalog::{CatalogWriter, Categorizer, WriteReport};

use crate::config::Config;

/// Extract, categorize and write the JSON documents.
pub fn extract(config: &Config) -> Result<WriteReport> {
    let source_dir = config.examples_dir();
    tracing::info!("Extracting examples from {}", source_dir.display());

    let examples = config
        .extractor()
        .extract_dir(&source_dir)
        .context("Failed to extract examples")?;

    let catalog = Categorizer::new(config.catalog_config()?).categorize(examples);

    let writer = CatalogWriter::new(vec![config.content_dir(), config.public_dir()]);
    let report = writer.write(&catalog).context("Failed to write examples")?;

    Ok(report)
}

/// Run the extract command.
pub async fn run(config: &Config) -> Result<()> {
    let report = extract(config)?;

    tracing::info!(
        "Extracted {} examples into {} files",
        report.total_examples,
        report.files.len()
    );
    tracing::info!("Example extraction complete!");

    Ok(())
}
