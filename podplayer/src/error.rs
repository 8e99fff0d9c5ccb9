//! Error types for the playback client

/// Result type alias for playback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur on the playback side
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    Socket(#[from] tokio_tungstenite::tungstenite::Error),

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Base64 audio payload did not decode
    #[error("Audio decode failed: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Audio payload decoded to zero bytes
    #[error("Empty audio payload")]
    EmptyAudio,

    /// The player task has shut down
    #[error("Player task is gone")]
    PlayerClosed,

    /// Sink-level playback failure
    #[error("Sink error: {0}")]
    Sink(String),
}
