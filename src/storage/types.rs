use thiserror::Error;

pub type Key = String;
pub type KeyRef<'a> = &'a str;
pub type Value = String;

/// Failure reported by a [`Store`](super::Store) backend.
///
/// A missing key is never an error, `get` reports it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The operation reached the backend and was refused for this request.
    #[error("{0}")]
    Rejected(String),

    /// The backend itself cannot serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
