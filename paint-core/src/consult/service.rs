use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompletionError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A remote text-completion model.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Sends one stateless request and returns the generated text.
    async fn complete(
        &self,
        prompt: &str,
        system_instruction: &str,
    ) -> Result<String, CompletionError>;
}
