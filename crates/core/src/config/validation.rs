//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `similarity_threshold` is not in (0, 1]
    /// - `search_depth` is neither `basic` nor `advanced`
    /// - `max_results` is outside 1-20
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `similarity_model` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "similarity_threshold".into(),
                reason: "must be greater than 0 and at most 1".into(),
            });
        }

        if !matches!(self.search_depth.as_str(), "basic" | "advanced") {
            return Err(ConfigError::Invalid {
                field: "search_depth".into(),
                reason: format!("expected basic or advanced, got {:?}", self.search_depth),
            });
        }

        if !(1..=20).contains(&self.max_results) {
            return Err(ConfigError::Invalid { field: "max_results".into(), reason: "must be 1-20".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.similarity_model.is_empty() {
            return Err(ConfigError::Invalid { field: "similarity_model".into(), reason: "must not be empty".into() });
        }

        if self.live_search && self.mock_table_path.is_some() {
            tracing::warn!("Both live_search and mock_table_path are set; the mock table is ignored");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_bounds() {
        for threshold in [0.0, -0.5, 1.01, f32::NAN] {
            let config = AppConfig { similarity_threshold: threshold, ..Default::default() };
            let result = config.validate();
            assert!(
                matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "similarity_threshold"),
                "threshold {threshold} should be rejected"
            );
        }
        let config = AppConfig { similarity_threshold: 1.0, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_search_depth() {
        let config = AppConfig { search_depth: "basic".into(), ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { search_depth: "Advanced".into(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "search_depth"));
    }

    #[test]
    fn test_validate_max_results() {
        for max_results in [0, 21] {
            let config = AppConfig { max_results, ..Default::default() };
            let result = config.validate();
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_results"));
        }
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_empty_strings() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));

        let config = AppConfig { similarity_model: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "similarity_model"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_results: 1, timeout_ms: 100, ..Default::default() };
        assert!(config.validate().is_ok());

        let config = AppConfig { max_results: 20, timeout_ms: 300_000, ..Default::default() };
        assert!(config.validate().is_ok());
    }
}
