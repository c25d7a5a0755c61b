//! Runtime settings shared by the session, fetcher and searcher.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "mistral-large-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    // Model settings
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,

    // Cache settings
    pub cache_ttl_secs: u64,
    pub cache_max_entries: usize,

    // Web settings
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub search_language: String,
    pub search_results: usize,
    #[serde(skip_serializing)]
    pub brave_api_key: Option<String>,

    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            cache_ttl_secs: 3600,
            cache_max_entries: 100,
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            search_language: "ru".to_string(),
            search_results: 3,
            brave_api_key: None,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// List configuration problems. An empty list means the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.api_key.trim().is_empty() {
            issues.push("MISTRAL_API_KEY is not set".to_string());
        }
        if self.cache_max_entries == 0 {
            issues.push("cache max_entries must be greater than 0".to_string());
        }
        if self.request_timeout_secs == 0 {
            issues.push("web timeout_secs must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            issues.push(format!(
                "temperature {} is outside the 0.0..=2.0 range",
                self.temperature
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model, "mistral-large-latest");
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_max_entries, 100);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.search_results, 3);
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = AppConfig::default();
        assert_eq!(config.validate(), vec!["MISTRAL_API_KEY is not set"]);

        let config = AppConfig {
            api_key: "key".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig {
            api_key: "key".to_string(),
            cache_max_entries: 0,
            request_timeout_secs: 0,
            temperature: 3.5,
            ..AppConfig::default()
        };
        assert_eq!(config.validate().len(), 3);
    }
}
