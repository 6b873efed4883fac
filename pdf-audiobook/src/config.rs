//! pdf-audio configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tts_client::{AudioFormat, ProviderConfig, Voice};

use crate::pricing::DEFAULT_CENTS_PER_MILLION_CHARS;
use crate::text::DEFAULT_MAX_CHARS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfAudioConfig {
    /// Default narrator voice
    #[serde(default)]
    pub voice: Voice,

    /// Audio encoding of the output
    #[serde(default)]
    pub format: AudioFormat,

    /// Maximum characters per synthesis request
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Price of one million characters, in cents
    #[serde(default = "default_price")]
    pub price_per_million_cents: f64,

    /// Default directory for finished audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Speech API settings
    #[serde(default)]
    pub provider: ProviderConfig,
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_price() -> f64 {
    DEFAULT_CENTS_PER_MILLION_CHARS
}

impl Default for PdfAudioConfig {
    fn default() -> Self {
        Self {
            voice: Voice::default(),
            format: AudioFormat::default(),
            max_chars: default_max_chars(),
            price_per_million_cents: default_price(),
            output_dir: None,
            provider: ProviderConfig::default(),
        }
    }
}

impl PdfAudioConfig {
    /// Get the config file path: ~/.config/cli-programs/pdf-audio.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("pdf-audio.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: PdfAudioConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PdfAudioConfig::default();
        assert_eq!(config.voice, Voice::Alloy);
        assert_eq!(config.format, AudioFormat::Mp3);
        assert_eq!(config.max_chars, 4000);
        assert_eq!(config.price_per_million_cents, 1500.0);
        assert!(config.output_dir.is_none());
        assert_eq!(config.provider.model, "tts-1");
    }

    #[test]
    fn test_config_path() {
        let path = PdfAudioConfig::config_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.ends_with("cli-programs/pdf-audio.toml"));
    }

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
voice = "onyx"
format = "pcm"
max_chars = 2000
price_per_million_cents = 3000.0
output_dir = "/tmp/audio"

[provider]
model = "tts-1-hd"
timeout_secs = 60
"#;
        let config: PdfAudioConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voice, Voice::Onyx);
        assert_eq!(config.format, AudioFormat::Pcm);
        assert_eq!(config.max_chars, 2000);
        assert_eq!(config.price_per_million_cents, 3000.0);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/audio")));
        assert_eq!(config.provider.model, "tts-1-hd");
        assert_eq!(config.provider.timeout_secs, 60);
    }

    #[test]
    fn test_parse_empty_config() {
        let config: PdfAudioConfig = toml::from_str("").unwrap();
        assert_eq!(config.voice, Voice::Alloy);
        assert_eq!(config.max_chars, 4000);
        assert_eq!(config.provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_round_trip_keeps_voice() {
        let config = PdfAudioConfig {
            voice: Voice::Shimmer,
            ..PdfAudioConfig::default()
        };
        let parsed: PdfAudioConfig =
            toml::from_str(&toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(parsed.voice, Voice::Shimmer);
    }
}
