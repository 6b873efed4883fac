//! Per-chunk speech synthesis on top of a [`SpeechProvider`].

use crate::error::{PipelineError, Result};
use crate::text::TextChunk;
use tts_client::{AudioFormat, SpeechProvider, SpeechRequest, Voice};

/// Options applied to every chunk of one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtsOptions {
    pub voice: Voice,
    pub format: AudioFormat,
}

impl TtsOptions {
    /// Create new TTS options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voice.
    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    /// Set the audio encoding.
    pub fn with_format(mut self, format: AudioFormat) -> Self {
        self.format = format;
        self
    }
}

/// Synthesize one chunk, tagging any failure with the chunk's identity.
pub async fn synthesize_chunk(
    provider: &dyn SpeechProvider,
    chunk: &TextChunk,
    options: &TtsOptions,
) -> Result<Vec<u8>> {
    let request = SpeechRequest::new(chunk.text.as_str(), options.voice, options.format);

    provider
        .synthesize(&request)
        .await
        .map_err(|source| PipelineError::Synthesis {
            index: chunk.position,
            chars: chunk.char_count(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tts_client::{MockSpeechProvider, TtsError};

    #[test]
    fn test_tts_options_default() {
        let opts = TtsOptions::default();
        assert_eq!(opts.voice, Voice::Alloy);
        assert_eq!(opts.format, AudioFormat::Mp3);
    }

    #[test]
    fn test_tts_options_builder() {
        let opts = TtsOptions::new()
            .with_voice(Voice::Nova)
            .with_format(AudioFormat::Pcm);
        assert_eq!(opts.voice, Voice::Nova);
        assert_eq!(opts.format, AudioFormat::Pcm);
    }

    #[tokio::test]
    async fn test_synthesize_chunk() {
        let provider = MockSpeechProvider::always_succeeds();
        let chunk = TextChunk::new(0, "Hello world".to_string());

        let audio = synthesize_chunk(&provider, &chunk, &TtsOptions::new())
            .await
            .unwrap();
        assert_eq!(audio, MockSpeechProvider::audio_for("Hello world"));
    }

    #[tokio::test]
    async fn test_failure_carries_chunk_identity() {
        let provider = MockSpeechProvider::fails_on_call(0);
        let chunk = TextChunk::new(4, "naïve text".to_string());

        let err = synthesize_chunk(&provider, &chunk, &TtsOptions::new())
            .await
            .unwrap_err();
        match err {
            PipelineError::Synthesis {
                index,
                chars,
                source,
            } => {
                assert_eq!(index, 4);
                assert_eq!(chars, 10);
                assert!(matches!(source, TtsError::ApiError { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
