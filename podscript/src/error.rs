//! Error types for the generation-provider client

/// Result type alias for script operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the generation provider
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
    #[error("Generation API error: {0}")]
    Api(String),

    /// The provider answered without any usable completion
    #[error("Empty completion in provider response")]
    EmptyCompletion,

    /// No API key configured for the provider
    #[error("Script provider API key is not configured")]
    MissingApiKey,

    /// Configuration error (from podconfig/anyhow)
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }
}
