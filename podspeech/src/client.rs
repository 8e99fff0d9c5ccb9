//! HTTP client for the speech-synthesis provider
//!
//! # Example
//!
//! ```no_run
//! use podspeech::SpeechClient;
//! use podscript::SegmentKind;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SpeechClient::builder().api_key("my-key").build()?;
//!
//!     let audio_b64 = client
//!         .synthesize_segment(SegmentKind::Narration, "Bem-vindos ao PodWave")
//!         .await?;
//!     println!("{} bytes of base64 audio", audio_b64.len());
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{SynthesizeRequest, SynthesizeResponse};
use crate::profiles;
use podscript::SegmentKind;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default synthesis provider base URL
pub const DEFAULT_BASE_URL: &str = "https://texttospeech.googleapis.com";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Speech-synthesis provider HTTP client
///
/// Stateless; one POST per synthesis. There is no retry policy: a failed
/// synthesis is reported once and the caller decides whether to skip the
/// affected segment.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl SpeechClient {
    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from the global PodWave configuration
    pub fn from_config() -> Result<Self> {
        let config = podconfig::get_config();
        Self::from_config_obj(config.as_ref())
    }

    /// Create a client from a specific configuration object
    pub fn from_config_obj(config: &podconfig::Config) -> Result<Self> {
        use crate::config_ext::SpeechConfigExt;

        let api_key = config
            .get_speech_api_key()?
            .ok_or(Error::MissingApiKey)?;

        Self::builder()
            .base_url(config.get_speech_base_url()?)
            .api_key(api_key)
            .build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synthesizes one segment with the voice profile for its kind
    ///
    /// Returns the base64-encoded audio bytes.
    pub async fn synthesize_segment(&self, kind: SegmentKind, content: &str) -> Result<String> {
        self.synthesize(&profiles::request_for(kind, content)).await
    }

    /// Sends a raw synthesis request
    pub async fn synthesize(&self, request: &SynthesizeRequest) -> Result<String> {
        let url = format!("{}/v1/text:synthesize", self.base_url);

        debug!(
            voice = %request.voice.name,
            text_len = request.input.text.len(),
            "Requesting synthesis"
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::api(format!(
                "text:synthesize returned status {}",
                response.status()
            )));
        }

        let body: SynthesizeResponse = response.json().await?;
        if body.audio_content.is_empty() {
            return Err(Error::EmptyAudio);
        }

        Ok(body.audio_content)
    }
}

/// Builder for [`SpeechClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    client: Option<Client>,
}

impl ClientBuilder {
    /// Override the provider base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the provider API key (required)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a custom reqwest client
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the client
    pub fn build(self) -> Result<SpeechClient> {
        let api_key = self.api_key.ok_or(Error::MissingApiKey)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        url::Url::parse(&base_url)?;

        Ok(SpeechClient {
            client: self.client.unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        })
    }
}
