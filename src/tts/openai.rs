use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{SpeechParams, SpeechProvider};
use crate::error::ProviderError;

/// Client for an OpenAI-compatible `/audio/speech` endpoint.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl SpeechProvider for OpenAiProvider {
    async fn create_speech(&self, params: &SpeechParams<'_>) -> Result<Vec<u8>, ProviderError> {
        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.api_key)
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
