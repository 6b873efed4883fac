//! Speech provider implementations

pub mod mock;
mod openai;

pub use mock::MockSpeechProvider;
pub use openai::OpenAiSpeechProvider;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::provider::SpeechProvider;

/// Create the configured provider instance
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn SpeechProvider>> {
    let provider = OpenAiSpeechProvider::from_config(config)?;
    provider.is_available()?;
    Ok(Box::new(provider))
}
