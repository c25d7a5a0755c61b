//! CLI configuration file support
//!
//! Loads configuration from ~/.config/sue/config.toml

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sue_ai::AppConfig;

const MISTRAL_API_KEY_ENV: &str = "MISTRAL_API_KEY";
const BRAVE_API_KEY_ENV: &str = "BRAVE_API_KEY";

/// CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Model and logging settings
    #[serde(default)]
    pub default: DefaultConfig,
    /// Web cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Page fetch and search settings
    #[serde(default)]
    pub web: WebConfig,
    /// API key settings
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Chat completions base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Language hint passed to the search provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_language: Option<String>,
    /// Results used by /s_web
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_results: Option<usize>,
}

/// API key configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiKeysConfig {
    /// Mistral API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mistral: Option<String>,
    /// Brave Search API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brave: Option<String>,
}

impl CliConfig {
    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Get the default configuration file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sue").join("config.toml"))
    }

    /// Write the configuration, creating parent directories as needed
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolve runtime settings: environment keys first, then this file,
    /// then built-in defaults.
    pub fn to_app_config(&self) -> AppConfig {
        self.to_app_config_with_env(|name| std::env::var(name).ok())
    }

    fn to_app_config_with_env(&self, env: impl Fn(&str) -> Option<String>) -> AppConfig {
        let defaults = AppConfig::default();
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        AppConfig {
            model: self.default.model.clone().unwrap_or(defaults.model),
            temperature: self.default.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.default.max_tokens.unwrap_or(defaults.max_tokens),
            base_url: self.default.base_url.clone().unwrap_or(defaults.base_url),
            api_key: non_empty(env(MISTRAL_API_KEY_ENV))
                .or_else(|| non_empty(self.api_keys.mistral.clone()))
                .unwrap_or_default(),
            cache_ttl_secs: self.cache.ttl_secs.unwrap_or(defaults.cache_ttl_secs),
            cache_max_entries: self.cache.max_entries.unwrap_or(defaults.cache_max_entries),
            request_timeout_secs: self.web.timeout_secs.unwrap_or(defaults.request_timeout_secs),
            user_agent: self.web.user_agent.clone().unwrap_or(defaults.user_agent),
            search_language: self
                .web
                .search_language
                .clone()
                .unwrap_or(defaults.search_language),
            search_results: self.web.search_results.unwrap_or(defaults.search_results),
            brave_api_key: non_empty(env(BRAVE_API_KEY_ENV))
                .or_else(|| non_empty(self.api_keys.brave.clone())),
            log_level: self.default.log_level.clone().unwrap_or(defaults.log_level),
        }
    }
}
