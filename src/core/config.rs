//! Configuration management

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub general: GeneralConfig,
    pub cache: CacheConfig,
    pub model: ModelConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: [u8; 4],
    /// Listen port
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// UTC offset (hours) of the campuses; item dates are calendar days in
    /// this zone
    pub utc_offset_hours: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Response cache TTL (seconds)
    pub ttl_secs: u64,
    /// Maximum cached responses
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Whether the language-model interpreter is enabled at all
    pub enabled: bool,
    /// OpenAI-compatible chat completions endpoint base
    pub api_base: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion token cap
    pub max_tokens: u32,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// PostgREST-style endpoint base (e.g. a Supabase project URL)
    pub api_base: String,
    /// Candidate items fetched per search
    pub item_limit: usize,
    /// Request timeout (seconds)
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            general: GeneralConfig::default(),
            cache: CacheConfig::default(),
            model: ModelConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: [127, 0, 0, 1],
            port: 8360,
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { utc_offset_hours: 9 }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 600,
            max_entries: 100,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base: "https://api.perplexity.ai".to_string(),
            model: "sonar-pro".to_string(),
            temperature: 0.1,
            max_tokens: 150,
            timeout_secs: 3,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            item_limit: 30,
            timeout_secs: 5,
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // Check FINDU_CONFIG env var first
        if let Ok(path) = std::env::var("FINDU_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("dev", "findu", "findu")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine findu config directory".to_string(),
            })
    }

    /// API key for the model collaborator, from the environment
    pub fn model_api_key() -> Option<String> {
        std::env::var("FINDU_MODEL_API_KEY")
            .or_else(|_| std::env::var("PPLX_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
    }

    /// API key for the item store, from the environment
    pub fn store_api_key() -> Option<String> {
        std::env::var("FINDU_STORE_API_KEY")
            .or_else(|_| std::env::var("SUPABASE_ANON_KEY"))
            .ok()
            .filter(|k| !k.is_empty())
    }
}
