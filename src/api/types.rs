//! Request/Response for API interaction.

use super::error::ServiceError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Request {
    Get { key: String },
    Set { key: String, value: String },
    Delete { key: String },
    Health,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Response {
    Get(GetResponse),
    Set(WriteResponse),
    Delete(WriteResponse),
    Health(HealthResponse),
}

/// A decoded request, or the reason the line could not be parsed into one.
pub type Incoming = Result<Request, ServiceError>;

/// What goes back to the client for each request.
pub type Reply = Result<Response, ServiceError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GetResponse {
    pub value: String,
    pub found: bool,
}

impl GetResponse {
    pub fn found(value: String) -> Self {
        Self { value, found: true }
    }

    pub fn missing() -> Self {
        Self::default()
    }
}

/// Outcome of `set` and `delete`. A failed write is still a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WriteResponse {
    pub success: bool,
    pub error: String,
}

impl WriteResponse {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: String::new(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}
