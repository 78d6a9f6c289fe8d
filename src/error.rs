//! Error handling for the Lavka client

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for the Lavka client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or connectivity errors; the backend was never reached
    #[error("cannot reach server: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A non-2xx response from the backend; `message` carries the
    /// human-readable message from the response body, verbatim
    #[error("{message}")]
    Rejected {
        /// HTTP status of the rejected request
        status: StatusCode,
        /// Message from the response body
        message: String,
    },

    /// Authentication errors raised before any request is made
    #[error("authentication error: {0}")]
    Auth(String),

    /// Field-scoped validation errors, caught before any network call
    #[error("{field}: {message}")]
    Validation {
        /// The offending input field
        field: String,
        /// What is wrong with it
        message: String,
    },

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error for a named field
    pub fn validation<F: fmt::Display, M: fmt::Display>(field: F, message: M) -> Self {
        Error::Validation {
            field: field.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a new backend-rejection error
    pub fn rejected<T: fmt::Display>(status: StatusCode, message: T) -> Self {
        Error::Rejected {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }
}
