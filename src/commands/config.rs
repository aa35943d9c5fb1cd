use anyhow::Result;
use colored::Colorize;
use product_lens::{
    catalog::SupportedModel,
    config::{self, mask_secret, Config},
};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Displays the current configuration with secrets masked
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!(config = %config_path.display(), "Loading configuration for display");

    let cfg = config::load_config(config_path)?;
    let sanitized = sanitize_secrets(&cfg);

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", toml::to_string_pretty(&sanitized)?);

    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen:    {}:{}", cfg.server.host, cfg.server.port);
    println!("  Endpoint:  {}", cfg.llm.base_url);
    println!("  Model:     {}", describe_model(&cfg.llm.model));
    println!("  Timeout:   {}s", cfg.llm.timeout_seconds);
    println!("  Database:  {}", cfg.database.url);
    println!(
        "  Metrics:   {}",
        if cfg.metrics.enabled { "enabled" } else { "disabled" }
    );

    info!("Configuration validation successful");
    Ok(())
}

fn sanitize_secrets(cfg: &Config) -> Config {
    let mut sanitized = cfg.clone();
    sanitized.llm.api_key = mask_secret(&sanitized.llm.api_key);
    sanitized
}

fn describe_model(model: &str) -> String {
    if SupportedModel::is_supported(model) {
        model.to_string()
    } else {
        format!("{} {}", model, "(not in catalog)".yellow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use product_lens::config::{DatabaseConfig, LlmConfig, MetricsConfig, ServerConfig};

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig::default(),
            llm: LlmConfig {
                base_url: "https://llm.example.com".to_string(),
                api_key: "sk-live-1234567890".to_string(),
                model: "gpt-4.1".to_string(),
                timeout_seconds: 60,
            },
            database: DatabaseConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    #[test]
    fn test_sanitize_secrets_masks_api_key() {
        let cfg = create_test_config();
        let sanitized = sanitize_secrets(&cfg);

        assert_eq!(sanitized.llm.api_key, "sk-l***");
        assert_eq!(sanitized.llm.base_url, cfg.llm.base_url);
        assert_eq!(cfg.llm.api_key, "sk-live-1234567890");
    }

    #[test]
    fn test_sanitized_config_renders_as_toml() {
        let rendered = toml::to_string_pretty(&sanitize_secrets(&create_test_config())).unwrap();
        assert!(rendered.contains("[llm]"));
        assert!(!rendered.contains("1234567890"));
    }
}
