// src/config.rs
//! Application configuration, constructed once at startup and passed to
//! each component.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
    /// Read from the LLM_API_KEY environment variable, never from the file.
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_crawler_timeout")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: Option<AppConfig>,
    production: Option<AppConfig>,
}

fn default_api_url() -> String {
    "https://api.hyperbolic.xyz/v1".to_string()
}

fn default_model() -> String {
    "meta-llama/Meta-Llama-3.1-8B-Instruct".to_string()
}

fn default_temperature() -> f32 {
    0.0
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_llm_timeout() -> u64 {
    60
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_crawler_timeout() -> u64 {
    30
}

fn default_output_path() -> PathBuf {
    PathBuf::from("out")
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_llm_timeout(),
            api_key: None,
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_crawler_timeout(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            crawler: CrawlerConfig::default(),
            output_path: default_output_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration for the current environment, falling back to
    /// built-in defaults when no config.yaml is present.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let mut config = if std::path::Path::new(CONFIG_FILE).exists() {
            Self::load_from_file(&environment)?
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn get_environment() -> String {
        std::env::var("JOBFIT_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_from_file(environment: &str) -> Result<Self> {
        let content = std::fs::read_to_string(CONFIG_FILE)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;
        Self::from_yaml(&content, environment)
    }

    fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)
            .with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        let section = match environment {
            "production" => config_file.production,
            _ => config_file.local,
        };

        Ok(section.unwrap_or_default())
    }

    fn apply_env_overrides(&mut self) {
        self.llm.api_key = std::env::var("LLM_API_KEY").ok();
        if let Ok(url) = std::env::var("LLM_API_URL") {
            self.llm.api_url = url;
        }
        if let Ok(model) = std::env::var("LLM_MODEL") {
            self.llm.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.llm.max_tokens, 1024);
        assert_eq!(config.crawler.timeout_seconds, 30);
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_from_yaml_selects_environment() {
        let yaml = r#"
local:
  llm:
    model: local-model
production:
  llm:
    model: prod-model
  crawler:
    timeout_seconds: 10
"#;
        let local = AppConfig::from_yaml(yaml, "local").unwrap();
        assert_eq!(local.llm.model, "local-model");
        // Unset fields keep their defaults
        assert_eq!(local.crawler.timeout_seconds, 30);

        let prod = AppConfig::from_yaml(yaml, "production").unwrap();
        assert_eq!(prod.llm.model, "prod-model");
        assert_eq!(prod.crawler.timeout_seconds, 10);
    }

    #[test]
    fn test_from_yaml_missing_section_falls_back() {
        let yaml = "local:\n  llm:\n    model: only-local\n";
        let config = AppConfig::from_yaml(yaml, "production").unwrap();
        assert_eq!(config.llm.model, default_model());
    }
}
