use thiserror::Error;

#[derive(Error, Debug)]
pub enum TtsError {
    #[error(
        "API key not found for {provider}. Set {env_var} environment variable or add to config."
    )]
    MissingApiKey { provider: String, env_var: String },

    #[error("Unknown voice: {0}")]
    InvalidVoice(String),

    #[error("Unsupported audio format: {0}")]
    InvalidFormat(String),

    #[error("Rate limit exceeded{}", .retry_after.map(|s| format!(". Retry after {} seconds", s)).unwrap_or_default())]
    RateLimited { retry_after: Option<u64> },

    #[error("API error{}: {message}", status_code.map(|c| format!(" (HTTP {})", c)).unwrap_or_default())]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Provider returned no audio")]
    EmptyAudio,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, TtsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TtsError::ApiError {
            message: "bad voice".to_string(),
            status_code: Some(400),
        };
        assert_eq!(err.to_string(), "API error (HTTP 400): bad voice");

        let err = TtsError::RateLimited {
            retry_after: Some(20),
        };
        assert_eq!(err.to_string(), "Rate limit exceeded. Retry after 20 seconds");
        assert_eq!(
            TtsError::RateLimited { retry_after: None }.to_string(),
            "Rate limit exceeded"
        );
        assert_eq!(TtsError::EmptyAudio.to_string(), "Provider returned no audio");
    }
}
