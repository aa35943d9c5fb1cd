use crate::catalog::SupportedModel;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix; nested keys use `__`, e.g. `PRODUCT_LENS__LLM__API_KEY`
pub const ENV_PREFIX: &str = "PRODUCT_LENS";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// "pretty" or "json"
    pub log_format: String,
    /// Upper bound on request bodies, which caps uploaded image size
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Completion endpoint settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Base address; `/v1/chat/completions` is appended
    pub base_url: String,
    /// Static bearer credential
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_model() -> String {
    SupportedModel::DEFAULT.as_str().to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. "sqlite:products.db" or "sqlite::memory:"
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:products.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Load configuration from a TOML file layered under `PRODUCT_LENS__*` variables
///
/// The file is optional so a deployment can be configured from the environment alone.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let base_url = cfg.llm.base_url.trim();
    if base_url.is_empty() {
        anyhow::bail!("llm.base_url must be set");
    }
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        anyhow::bail!("llm.base_url must be an http(s) URL, got '{}'", base_url);
    }

    if cfg.llm.api_key.trim().is_empty() {
        anyhow::bail!("llm.api_key must be set");
    }

    if cfg.llm.timeout_seconds == 0 {
        anyhow::bail!("llm.timeout_seconds must be greater than 0");
    }

    match cfg.server.log_format.as_str() {
        "pretty" | "json" => {}
        other => anyhow::bail!("server.log_format must be 'pretty' or 'json', got '{}'", other),
    }

    if cfg.database.url.trim().is_empty() {
        anyhow::bail!("database.url must be set");
    }

    // The endpoint is the authority on model names; only flag likely typos
    if !SupportedModel::is_supported(&cfg.llm.model) {
        tracing::warn!(
            model = %cfg.llm.model,
            "Configured model is not in the known model catalog"
        );
    }

    Ok(())
}

/// Render a secret for display, keeping only a short prefix
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> anyhow::Result<Config> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    fn create_test_config() -> Config {
        Config {
            server: ServerConfig::default(),
            llm: LlmConfig {
                base_url: "https://llm.example.com".to_string(),
                api_key: "sk-test".to_string(),
                model: "claude-4-sonnet".to_string(),
                timeout_seconds: 30,
            },
            database: DatabaseConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let cfg = parse(
            r#"
            [llm]
            base_url = "https://llm.example.com"
            api_key = "sk-abc"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.log_format, "pretty");
        assert_eq!(cfg.llm.model, "claude-4-sonnet");
        assert_eq!(cfg.llm.timeout_seconds, 60);
        assert_eq!(cfg.database.max_connections, 5);
        assert!(cfg.metrics.enabled);
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_missing_llm_section_fails() {
        assert!(parse("[server]\nport = 9000\n").is_err());
    }

    #[test]
    fn test_validate_config_requires_api_key() {
        let mut cfg = create_test_config();
        cfg.llm.api_key = "  ".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("llm.api_key"));
    }

    #[test]
    fn test_validate_config_requires_http_base_url() {
        let mut cfg = create_test_config();
        cfg.llm.base_url = "ftp://llm.example.com".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_zero_timeout() {
        let mut cfg = create_test_config();
        cfg.llm.timeout_seconds = 0;
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_unknown_log_format() {
        let mut cfg = create_test_config();
        cfg.server.log_format = "xml".to_string();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_unknown_model_only_warns() {
        let mut cfg = create_test_config();
        cfg.llm.model = "my-private-model".to_string();
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("nA6EgISiPUzsaGMKufDG"), "nA6E***");
        assert_eq!(mask_secret("short"), "***");
    }
}
