//! Mock speech provider for testing
//!
//! Returns deterministic audio derived from the input text, so callers can
//! check ordering and lengths without a network service.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Result, TtsError};
use crate::provider::{SpeechProvider, SpeechRequest};

/// A mock provider returning fixed-shape audio for each request
pub struct MockSpeechProvider {
    /// 0-based call number that fails (None = always succeed)
    fail_on_call: Option<usize>,
    /// Current call count
    call_count: AtomicUsize,
    /// Inputs received, in call order
    inputs: Mutex<Vec<String>>,
}

impl MockSpeechProvider {
    /// Create a provider that always succeeds
    pub fn always_succeeds() -> Self {
        Self {
            fail_on_call: None,
            call_count: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider whose `n`th call (0-based) fails with an API error
    pub fn fails_on_call(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::always_succeeds()
        }
    }

    /// Audio the mock produces for `text`: a header byte, then the text bytes
    pub fn audio_for(text: &str) -> Vec<u8> {
        let mut audio = Vec::with_capacity(text.len() + 1);
        audio.push(0xFF);
        audio.extend_from_slice(text.as_bytes());
        audio
    }

    /// Get the number of times synthesize() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get the texts received so far, in call order
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().map(|i| i.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechProvider for MockSpeechProvider {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>> {
        let call_num = self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut inputs) = self.inputs.lock() {
            inputs.push(request.input.clone());
        }

        if self.fail_on_call == Some(call_num) {
            return Err(TtsError::ApiError {
                message: format!("mock failure on call {}", call_num),
                status_code: Some(500),
            });
        }

        Ok(Self::audio_for(&request.input))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> Result<()> {
        Ok(())
    }
}
