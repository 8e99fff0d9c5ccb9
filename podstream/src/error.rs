//! Error types for the streaming orchestrator

/// Result type alias for streaming operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a stream
///
/// These surface to the client as `error` messages; nothing here closes the
/// connection or aborts the process.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Script or topic generation failed
    #[error("Falha na geração do roteiro: {0}")]
    Script(#[from] podscript::Error),

    /// Speech synthesis failed
    #[error("Falha na geração de fala: {0}")]
    Speech(#[from] podspeech::Error),

    /// Malformed incoming client message
    #[error("Mensagem inválida: {0}")]
    BadMessage(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}
