//! Error types for the conversational interface.

use davenport_core::error::DavenportError;

use crate::llm::LlmError;

/// Errors from the chat engine.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("retrieval error: {0}")]
    Retrieval(String),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<DavenportError> for ChatError {
    fn from(err: DavenportError) -> Self {
        match err {
            DavenportError::Retrieval(msg) | DavenportError::Embedding(msg) => {
                ChatError::Retrieval(msg)
            }
            DavenportError::Llm(msg) => ChatError::Llm(LlmError::Provider(msg)),
            other => ChatError::Storage(other.to_string()),
        }
    }
}
