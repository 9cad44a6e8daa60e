use contracts::shared::validation::ValidationError;
use thiserror::Error;

/// Everything that can go wrong in a list-view operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Request failed, timed out, or came back non-2xx without a usable body
    #[error("Network error: {0}")]
    Network(String),
    /// A 2xx response whose body is not the expected JSON
    #[error("Unexpected response: {0}")]
    Format(String),
    /// Rejected locally; nothing was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// The backend answered with `success: false` or an error message
    #[error("{0}")]
    Server(String),
    /// The backend rejected the bearer token; the session has been cleared
    #[error("Session expired. Please login again.")]
    Unauthorized,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
