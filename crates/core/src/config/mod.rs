//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (SEMFW_*)
//! 2. TOML config file (if SEMFW_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Which similarity oracle backs the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OracleKind {
    /// LLM judge over an OpenAI-compatible chat completions API.
    #[default]
    Llm,
    /// Local hashed bag-of-words embeddings with a cosine threshold.
    Embedding,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (SEMFW_*)
/// 2. TOML config file (if SEMFW_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the similarity LLM (Groq).
    ///
    /// Set via SEMFW_GROQ_API_KEY environment variable.
    /// Required only when `oracle = "llm"`.
    #[serde(default)]
    pub groq_api_key: Option<String>,

    /// API key for the live search provider (Tavily).
    ///
    /// Set via SEMFW_TAVILY_API_KEY environment variable.
    /// Required only when `live_search` is enabled.
    #[serde(default)]
    pub tavily_api_key: Option<String>,

    /// Use the live search API instead of the offline mock table.
    ///
    /// Set via SEMFW_LIVE_SEARCH environment variable.
    #[serde(default)]
    pub live_search: bool,

    /// Similarity oracle implementation.
    ///
    /// Set via SEMFW_ORACLE environment variable (`llm` or `embedding`).
    #[serde(default)]
    pub oracle: OracleKind,

    /// Chat model used by the LLM oracle.
    ///
    /// Set via SEMFW_SIMILARITY_MODEL environment variable.
    #[serde(default = "default_similarity_model")]
    pub similarity_model: String,

    /// Minimum cosine similarity for the embedding oracle to report a match.
    ///
    /// Set via SEMFW_SIMILARITY_THRESHOLD environment variable.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f32,

    /// Live search depth (`basic` or `advanced`).
    ///
    /// Set via SEMFW_SEARCH_DEPTH environment variable.
    #[serde(default = "default_search_depth")]
    pub search_depth: String,

    /// Maximum records requested per live search.
    ///
    /// Set via SEMFW_MAX_RESULTS environment variable.
    #[serde(default = "default_max_results")]
    pub max_results: u8,

    /// JSON file replacing the built-in mock search table.
    ///
    /// Set via SEMFW_MOCK_TABLE_PATH environment variable.
    #[serde(default)]
    pub mock_table_path: Option<PathBuf>,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via SEMFW_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via SEMFW_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_similarity_model() -> String {
    "llama3-8b-8192".into()
}

fn default_similarity_threshold() -> f32 {
    0.8
}

fn default_search_depth() -> String {
    "advanced".into()
}

fn default_max_results() -> u8 {
    5
}

fn default_user_agent() -> String {
    "semfw/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            tavily_api_key: None,
            live_search: false,
            oracle: OracleKind::default(),
            similarity_model: default_similarity_model(),
            similarity_threshold: default_similarity_threshold(),
            search_depth: default_search_depth(),
            max_results: default_max_results(),
            mock_table_path: None,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `SEMFW_`
    /// 2. TOML file from `SEMFW_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("SEMFW_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("SEMFW_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Check if the LLM API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Groq API key is not set.
    pub fn require_groq_api_key(&self) -> Result<&str, ConfigError> {
        self.groq_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "groq_api_key".into(),
            hint: "Set SEMFW_GROQ_API_KEY or use SEMFW_ORACLE=embedding".into(),
        })
    }

    /// Check if the live search API key is available (for deferred validation).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the Tavily API key is not set.
    pub fn require_tavily_api_key(&self) -> Result<&str, ConfigError> {
        self.tavily_api_key.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "tavily_api_key".into(),
            hint: "Set SEMFW_TAVILY_API_KEY or disable SEMFW_LIVE_SEARCH".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.groq_api_key.is_none());
        assert!(config.tavily_api_key.is_none());
        assert!(!config.live_search);
        assert_eq!(config.oracle, OracleKind::Llm);
        assert_eq!(config.similarity_model, "llama3-8b-8192");
        assert_eq!(config.similarity_threshold, 0.8);
        assert_eq!(config.search_depth, "advanced");
        assert_eq!(config.max_results, 5);
        assert!(config.mock_table_path.is_none());
        assert_eq!(config.user_agent, "semfw/0.1");
        assert_eq!(config.timeout_ms, 20_000);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
    }

    #[test]
    fn test_require_keys_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.require_groq_api_key(), Err(ConfigError::Missing { .. })));
        assert!(matches!(config.require_tavily_api_key(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_keys_present() {
        let config = AppConfig {
            groq_api_key: Some("gsk-test".into()),
            tavily_api_key: Some("tvly-test".into()),
            ..Default::default()
        };
        assert_eq!(config.require_groq_api_key().unwrap(), "gsk-test");
        assert_eq!(config.require_tavily_api_key().unwrap(), "tvly-test");
    }

    #[test]
    fn test_load_from_env() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SEMFW_LIVE_SEARCH", "true");
            jail.set_env("SEMFW_ORACLE", "embedding");
            jail.set_env("SEMFW_MAX_RESULTS", "10");
            jail.set_env("SEMFW_TAVILY_API_KEY", "tvly-env");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert!(config.live_search);
            assert_eq!(config.oracle, OracleKind::Embedding);
            assert_eq!(config.max_results, 10);
            assert_eq!(config.tavily_api_key.as_deref(), Some("tvly-env"));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_toml_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "semfw.toml",
                r#"
                similarity_model = "llama3-70b-8192"
                search_depth = "basic"
                timeout_ms = 5000
                "#,
            )?;
            jail.set_env("SEMFW_CONFIG_FILE", "semfw.toml");
            jail.set_env("SEMFW_TIMEOUT_MS", "7000");

            let config = AppConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.similarity_model, "llama3-70b-8192");
            assert_eq!(config.search_depth, "basic");
            assert_eq!(config.timeout_ms, 7000);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("SEMFW_SEARCH_DEPTH", "deep");
            assert!(matches!(AppConfig::load(), Err(ConfigError::Invalid { .. })));
            Ok(())
        });
    }
}
