// Configuration loading and merging
// Priority order: CLI flags -> environment -> config file -> defaults

use crate::file_storage::default_data_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub ai: AiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Empty list means permissive CORS (development default)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 7420,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Base URL of the chat-completions endpoint
    pub base_url: String,
    /// Inline API key; takes precedence over `api_key_env`
    pub api_key: Option<String>,
    /// Environment variable consulted when no inline key is set
    pub api_key_env: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Request timeout; the endpoint promises nothing about promptness
    pub request_timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_env: "TASKMIND_API_KEY".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            request_timeout_secs: 60,
        }
    }
}

impl AiConfig {
    /// Inline key first, then the configured environment variable
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Partial configuration as read from a TOML file.
/// Uses Option<T> for all fields to support partial overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialConfig {
    pub server: Option<PartialServerConfig>,
    pub ai: Option<PartialAiConfig>,
    pub storage: Option<PartialStorageConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub cors_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialAiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub api_key_env: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PartialStorageConfig {
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults overlaid with the TOML file at `path`
    /// (if any). CLI/env overrides are applied afterwards by the caller.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        let mut config = AppConfig::default();

        if let Some(path) = path {
            if path.exists() {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| format!("Failed to read config file {:?}: {}", path, e))?;
                let partial: PartialConfig = toml::from_str(&content)
                    .map_err(|e| format!("Failed to parse config file {:?}: {}", path, e))?;
                config.apply(partial);
                log::info!("Loaded configuration from {:?}", path);
            } else {
                log::warn!("Config file {:?} not found, using defaults", path);
            }
        }

        Ok(config)
    }

    /// Overlay a partial configuration onto this one
    pub fn apply(&mut self, partial: PartialConfig) {
        if let Some(server) = partial.server {
            if let Some(bind) = server.bind {
                self.server.bind = bind;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(origins) = server.cors_origins {
                self.server.cors_origins = origins;
            }
        }
        if let Some(ai) = partial.ai {
            if let Some(base_url) = ai.base_url {
                self.ai.base_url = base_url;
            }
            if let Some(api_key) = ai.api_key {
                self.ai.api_key = Some(api_key);
            }
            if let Some(api_key_env) = ai.api_key_env {
                self.ai.api_key_env = api_key_env;
            }
            if let Some(model) = ai.model {
                self.ai.model = model;
            }
            if let Some(temperature) = ai.temperature {
                self.ai.temperature = temperature;
            }
            if let Some(max_tokens) = ai.max_tokens {
                self.ai.max_tokens = max_tokens;
            }
            if let Some(timeout) = ai.request_timeout_secs {
                self.ai.request_timeout_secs = timeout;
            }
        }
        if let Some(storage) = partial.storage {
            if let Some(data_dir) = storage.data_dir {
                self.storage.data_dir = data_dir;
            }
        }
    }

    /// Validate the configuration values.
    /// Returns Ok(()) if valid, or Err with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }
        if self.ai.model.trim().is_empty() {
            return Err("ai.model must not be empty".to_string());
        }
        if self.ai.max_tokens == 0 {
            return Err("ai.max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.ai.temperature) {
            return Err("ai.temperature must be between 0.0 and 2.0".to_string());
        }
        if self.ai.request_timeout_secs == 0 {
            return Err("ai.request_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
