//! Error handling for the Aqar client

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the Aqar client
#[derive(Error, Debug)]
pub enum Error {
    /// An operation needed a signed-in user and none was available
    #[error("authentication required")]
    AuthRequired,

    /// The request never reached the server
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server responded with a non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: StatusCode, message: String },

    /// A success response carried a body that did not match the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create a new HTTP error from a status and server-provided message
    pub fn http<T: fmt::Display>(status: StatusCode, message: T) -> Self {
        Error::Http {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new malformed-response error
    pub fn malformed<T: fmt::Display>(msg: T) -> Self {
        Error::MalformedResponse(msg.to_string())
    }
}
