//! HTTP client for the generation provider
//!
//! This module provides a client for the text-generation API used to write
//! episode scripts (batch mode) and short contextual topics (infinite mode).
//!
//! # Example
//!
//! ```no_run
//! use podscript::{ScriptClient, ScriptRequest, Preferences};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScriptClient::builder()
//!         .api_key("my-key")
//!         .build()?;
//!
//!     let script = client
//!         .generate_script(&ScriptRequest {
//!             title: "Noites de Jazz".into(),
//!             description: "Uma viagem pelo jazz brasileiro".into(),
//!             preferences: Preferences::default(),
//!             genres: vec!["jazz".into()],
//!             artists: vec!["João Donato".into()],
//!         })
//!         .await?;
//!     println!("{}", script);
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{GenerateContentRequest, GenerateContentResponse, ScriptRequest, TopicRequest};
use crate::prompt;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default generation provider base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Generation provider HTTP client
///
/// The client is stateless: every call is an independent POST against the
/// `generateContent` endpoint. Failures carry no retry policy; callers decide
/// whether to skip, substitute or surface the error.
#[derive(Debug, Clone)]
pub struct ScriptClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl ScriptClient {
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
        use crate::config_ext::ScriptConfigExt;

        let api_key = config
            .get_script_api_key()?
            .ok_or(Error::MissingApiKey)?;

        Self::builder()
            .base_url(config.get_script_base_url()?)
            .model(config.get_script_model()?)
            .api_key(api_key)
            .build()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the configured model name
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates a full episode script
    ///
    /// The returned text is expected (but not guaranteed) to follow the
    /// tagged-line format consumed by [`crate::parser::parse_script`].
    pub async fn generate_script(&self, request: &ScriptRequest) -> Result<String> {
        self.generate(&prompt::script_prompt(request)).await
    }

    /// Generates a short contextual topic for the next infinite-mode segment
    ///
    /// Callers are expected to substitute [`prompt::fallback_topic`] when
    /// this fails; topic generation is best-effort.
    pub async fn generate_topic(&self, request: &TopicRequest) -> Result<String> {
        let topic = self.generate(&prompt::topic_prompt(request)).await?;
        Ok(topic.trim().to_string())
    }

    /// Sends a prompt and extracts the first completion text
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        debug!(model = %self.model, prompt_len = prompt.len(), "Requesting completion");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::api(format!(
                "generateContent returned status {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        body.first_text()
            .map(str::to_string)
            .ok_or(Error::EmptyCompletion)
    }
}

/// Builder for [`ScriptClient`]
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    model: Option<String>,
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

    /// Override the generation model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
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

    /// Use a custom reqwest client (shared connection pools, proxies)
    pub fn http_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the client
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if no API key was provided, or
    /// [`Error::InvalidUrl`] if the base URL does not parse.
    pub fn build(self) -> Result<ScriptClient> {
        let api_key = self.api_key.ok_or(Error::MissingApiKey)?;
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Validate early so a bad config fails at startup, not per request
        url::Url::parse(&base_url)?;

        Ok(ScriptClient {
            client: self.client.unwrap_or_default(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_key,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        })
    }
}
