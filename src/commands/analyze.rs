use anyhow::{Context, Result};
use colored::Colorize;
use product_lens::{
    catalog::SupportedModel, config, init_tracing, pipeline::ProductAnalyzer,
    providers::completion::CompletionClient,
};
use std::{path::Path, sync::Arc};
use tracing::warn;

/// Execute the analyze command
///
/// Sends one image through the pipeline and prints the product as pretty JSON
/// on stdout. Progress and errors go to stderr so the output can be piped.
pub async fn execute(config_path: &Path, image: &Path, model: Option<String>) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.server.log_level, &cfg.server.log_format);

    let model = model.unwrap_or_else(|| cfg.llm.model.clone());
    if !SupportedModel::is_supported(&model) {
        warn!(model = %model, "Model is not in the known catalog, sending it anyway");
    }

    let bytes = tokio::fs::read(image)
        .await
        .with_context(|| format!("Failed to read image {}", image.display()))?;

    eprintln!(
        "{} {} ({} bytes) with {}",
        "Analyzing".yellow(),
        image.display(),
        bytes.len(),
        model.cyan()
    );

    let client = Arc::new(CompletionClient::new(&cfg.llm));
    let analyzer = ProductAnalyzer::new(client, model);

    match analyzer.analyze(&bytes).await {
        Ok(product) => {
            println!("{}", serde_json::to_string_pretty(&product)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} [{}] {}", "✗ Analysis failed".red(), e.kind(), e);
            Err(e.into())
        }
    }
}
