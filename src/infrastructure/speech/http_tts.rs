//! HTTP text-to-speech adapter
//!
//! Fetches encoded audio from a TTS server taking the text as a query parameter.

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{SpeechError, SpeechSynthesizer};
use crate::domain::config::DEFAULT_TTS_URL;
use crate::domain::timing::Duration;

/// Client for a `GET <url>?text=...` speech endpoint
pub struct HttpSpeechSynthesizer {
    url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpSpeechSynthesizer {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::default_request_timeout(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpSpeechSynthesizer {
    fn default() -> Self {
        Self::new(DEFAULT_TTS_URL)
    }
}

#[async_trait]
impl SpeechSynthesizer for HttpSpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("text", text)])
            .timeout(self.timeout.as_std())
            .send()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpeechError::HttpStatus(status.as_u16()));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SpeechError::RequestFailed(e.to_string()))?;

        debug!(bytes = audio.len(), "Speech audio received");
        Ok(audio.to_vec())
    }
}
