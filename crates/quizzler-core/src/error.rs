//! Unified error handling for quizzler-core

use thiserror::Error;

/// Fallback message for a 401 whose body carries no `error` field
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Fallback message for any other failed request
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong";

/// Core error type for quizzler-core
///
/// API failures display as the bare server message so front ends can show
/// them to the user as-is.
#[derive(Error, Debug)]
pub enum Error {
    /// 401 from the API
    #[error("{0}")]
    Unauthorized(String),

    /// Any other non-success status from the API
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// Public browsing endpoints report a fixed message on failure
    #[error("{0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    Parse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for quizzler-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unauthorized error
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Error::Unauthorized(msg.into())
    }

    /// Create a request-failed error for the given status
    pub fn request_failed(status: u16, msg: impl Into<String>) -> Self {
        Error::RequestFailed {
            status,
            message: msg.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// HTTP status carried by API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Unauthorized(_) => Some(401),
            Error::RequestFailed { status, .. } => Some(*status),
            Error::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
