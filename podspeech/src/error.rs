//! Error types for the speech-synthesis client

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when using the speech-synthesis client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// API returned an error status
    #[error("Synthesis API error: {0}")]
    Api(String),

    /// The provider answered without audio content
    #[error("Empty audio content in provider response")]
    EmptyAudio,

    /// No API key configured for the provider
    #[error("Speech provider API key is not configured")]
    MissingApiKey,

    /// Configuration error (from podconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
