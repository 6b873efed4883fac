//! Speech synthesis client library for the pdf-audiobook workspace
//!
//! Provides a single capability, text in and audio bytes out, behind the
//! [`SpeechProvider`] trait:
//! - OpenAI speech API (`/audio/speech`)
//! - Deterministic mock for tests

pub mod config;
pub mod error;
pub mod provider;
pub mod providers;

pub use config::ProviderConfig;
pub use error::{Result, TtsError};
pub use provider::{AudioFormat, SpeechProvider, SpeechRequest, Voice};
pub use providers::{MockSpeechProvider, OpenAiSpeechProvider, create_provider};
