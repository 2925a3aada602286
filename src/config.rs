use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the summarization chain.
///
/// Loaded once at process start and treated as read-only afterwards. The
/// orchestrator copies what it needs at construction, so no global state is
/// involved: build the config in `main` (or a test) and pass it by reference.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the cloud completion API.
    pub cloud_endpoint: String,
    /// API key for the cloud tier. When absent the tier is never registered.
    pub cloud_api_key: Option<String>,
    /// Model identifier sent to the cloud completion API.
    pub cloud_model: String,
    /// Per-attempt deadline for the cloud tier.
    pub cloud_timeout: Duration,
    /// Whether the cloud tier participates in the chain at all.
    pub cloud_enabled: bool,
    /// Base URL of the local inference runtime.
    pub local_endpoint: String,
    /// Model identifier understood by the local runtime.
    pub local_model: String,
    /// Per-attempt deadline for the local tier.
    pub local_timeout: Duration,
    /// Whether the local tier participates in the chain.
    pub local_enabled: bool,
}

const DEFAULT_CLOUD_ENDPOINT: &str = "https://api.openai.com/v1";
const DEFAULT_CLOUD_MODEL: &str = "gpt-4o-mini";
const DEFAULT_CLOUD_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_LOCAL_ENDPOINT: &str = "http://127.0.0.1:11434";
const DEFAULT_LOCAL_MODEL: &str = "mistral:7b";
const DEFAULT_LOCAL_TIMEOUT_MS: u64 = 60_000;

impl Config {
    /// Load configuration from environment variables, performing validation along the way.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            cloud_endpoint: load_env_optional("CLOUD_LLM_URL")
                .unwrap_or_else(|| DEFAULT_CLOUD_ENDPOINT.to_string()),
            cloud_api_key: load_env_optional("CLOUD_LLM_API_KEY"),
            cloud_model: load_env_optional("CLOUD_LLM_MODEL")
                .unwrap_or_else(|| DEFAULT_CLOUD_MODEL.to_string()),
            cloud_timeout: load_timeout("CLOUD_LLM_TIMEOUT_MS", DEFAULT_CLOUD_TIMEOUT_MS)?,
            cloud_enabled: load_flag("CLOUD_LLM_ENABLED", true)?,
            local_endpoint: load_env_optional("LOCAL_LLM_URL")
                .unwrap_or_else(|| DEFAULT_LOCAL_ENDPOINT.to_string()),
            local_model: load_env_optional("LOCAL_LLM_MODEL")
                .unwrap_or_else(|| DEFAULT_LOCAL_MODEL.to_string()),
            local_timeout: load_timeout("LOCAL_LLM_TIMEOUT_MS", DEFAULT_LOCAL_TIMEOUT_MS)?,
            local_enabled: load_flag("LOCAL_LLM_ENABLED", true)?,
        };

        tracing::debug!(
            cloud_endpoint = %config.cloud_endpoint,
            cloud_model = %config.cloud_model,
            cloud_enabled = config.cloud_effective(),
            local_endpoint = %config.local_endpoint,
            local_model = %config.local_model,
            local_enabled = config.local_enabled,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Whether the cloud tier is both enabled and holds a credential.
    pub fn cloud_effective(&self) -> bool {
        self.cloud_enabled && self.cloud_api_key.is_some()
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn load_timeout(key: &str, default_ms: u64) -> Result<Duration, ConfigError> {
    match load_env_optional(key) {
        None => Ok(Duration::from_millis(default_ms)),
        Some(value) => value
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}

fn load_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match load_env_optional(key) {
        None => Ok(default),
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        },
    }
}
