use serde::{Deserialize, Serialize};

use crate::error::{Result, TtsError};

/// Environment variable consulted when no key is configured
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_MODEL: &str = "tts-1";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Speech provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Speech model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL, without the trailing endpoint path
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (optional, can use env var instead)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProviderConfig {
    /// Get API key from config or environment variable
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Some(key) = self.api_key.as_ref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.clone());
        }

        std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| TtsError::MissingApiKey {
                provider: "OpenAI".to_string(),
                env_var: API_KEY_ENV_VAR.to_string(),
            })
    }
}
