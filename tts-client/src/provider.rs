use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TtsError};

/// Voices offered by the speech API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    /// Every voice, in the order they are presented to users
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    /// Identifier sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Voice {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| TtsError::InvalidVoice(s.to_string()))
    }
}

/// Audio encodings whose segments can be joined by plain byte concatenation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
    /// Raw 24kHz 16-bit little-endian mono samples, no header
    Pcm,
}

impl AudioFormat {
    /// Value of the API's `response_format` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Pcm => "pcm",
        }
    }

    /// File extension for artifacts in this format
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AudioFormat {
    type Err = TtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "pcm" => Ok(Self::Pcm),
            _ => Err(TtsError::InvalidFormat(s.to_string())),
        }
    }
}

/// Request to synthesize one piece of text
#[derive(Debug, Clone)]
pub struct SpeechRequest {
    pub input: String,
    pub voice: Voice,
    pub format: AudioFormat,
}

impl SpeechRequest {
    pub fn new(input: impl Into<String>, voice: Voice, format: AudioFormat) -> Self {
        Self {
            input: input.into(),
            voice,
            format,
        }
    }
}

/// Trait for speech synthesis providers
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    /// Synthesize the request's text and return the encoded audio
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>>;

    /// Get the provider name for display
    fn name(&self) -> &'static str;

    /// Check if the provider is usable (API key set, etc.)
    fn is_available(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_parse() {
        assert_eq!("alloy".parse::<Voice>().unwrap(), Voice::Alloy);
        assert_eq!(" Shimmer ".parse::<Voice>().unwrap(), Voice::Shimmer);
        assert!(matches!(
            "robot".parse::<Voice>(),
            Err(TtsError::InvalidVoice(v)) if v == "robot"
        ));
    }

    #[test]
    fn test_voice_display_matches_wire_name() {
        for voice in Voice::ALL {
            assert_eq!(voice.to_string().parse::<Voice>().unwrap(), voice);
        }
        assert_eq!(Voice::default(), Voice::Alloy);
    }

    #[test]
    fn test_audio_format() {
        assert_eq!("MP3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::Pcm.extension(), "pcm");
        assert!("wav".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn test_voice_serde_lowercase() {
        let json = serde_json::to_string(&Voice::Onyx).unwrap();
        assert_eq!(json, "\"onyx\"");
        let voice: Voice = serde_json::from_str("\"nova\"").unwrap();
        assert_eq!(voice, Voice::Nova);
    }
}
