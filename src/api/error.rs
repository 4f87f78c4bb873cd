//! Rejections raised by the service instead of a response.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request is malformed and never reached the store.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The service could not complete the request for reasons unrelated to its content.
    #[error("internal: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ServiceError::Internal(_) => "INTERNAL",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ServiceError::InvalidArgument(message) | ServiceError::Internal(message) => message,
        }
    }
}
