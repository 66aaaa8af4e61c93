//! Common error types for Lexiquiz components.

use thiserror::Error;

/// Common errors across Lexiquiz components
#[derive(Debug, Error)]
pub enum QuizError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cache store connection/operation error
    #[error("Store error: {0}")]
    Store(String),

    /// Vocabulary or word absent, or not owned by the caller
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token failed to decrypt, or decoded to an unexpected shape.
    /// Deliberately carries no detail: a malformed token and a token
    /// for a foreign namespace must be indistinguishable to the caller.
    #[error("Invalid request")]
    InvalidToken,

    /// The cache entry is gone: the quiz expired or was already graded.
    /// The two cases are intentionally not distinguished.
    #[error("Quiz expired or already graded")]
    QuizExpired,

    /// Unexpected failure from the word/definition collaborator
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl QuizError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Config(_) => 500,
            Self::Store(_) => 503,
            Self::NotFound(_) => 404,
            Self::InvalidToken => 400,
            Self::QuizExpired => 408,
            Self::Upstream(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Returns true if this error should be retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Upstream(_))
    }
}
