//! OpenAI speech API provider
//!
//! Talks to `POST {base_url}/audio/speech`, which answers with the encoded
//! audio as the raw response body.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{Result, TtsError};
use crate::provider::{SpeechProvider, SpeechRequest};

/// Provider for the OpenAI speech endpoint
pub struct OpenAiSpeechProvider {
    model: String,
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiSpeechProvider {
    /// Create a new provider with an explicit key
    pub fn new(model: &str, base_url: &str, api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TtsError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Create a provider from configuration, resolving the API key
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.resolve_api_key()?;
        Self::new(
            &config.model,
            &config.base_url,
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/speech", self.base_url)
    }
}

// OpenAI API request/response types

#[derive(Debug, Serialize)]
struct SpeechApiRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Pull the human-readable message out of an error body, if it has one
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error_response) => error_response.error.message,
        Err(_) => body.to_string(),
    }
}

#[async_trait]
impl SpeechProvider for OpenAiSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let body = SpeechApiRequest {
            model: &self.model,
            voice: request.voice.as_str(),
            input: &request.input,
            response_format: request.format.as_str(),
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TtsError::ApiError {
                message: format!("Request failed: {}", e),
                status_code: None,
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(TtsError::RateLimited { retry_after });
            }

            return Err(TtsError::ApiError {
                message: error_message(&error_text),
                status_code: Some(status.as_u16()),
            });
        }

        let audio = response.bytes().await.map_err(|e| TtsError::ApiError {
            message: format!("Failed to read audio body: {}", e),
            status_code: None,
        })?;

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        Ok(audio.to_vec())
    }

    fn name(&self) -> &'static str {
        "OpenAI"
    }

    fn is_available(&self) -> Result<()> {
        // API key was resolved in the constructor
        Ok(())
    }
}
