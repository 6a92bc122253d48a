//! Error kinds surfaced by the client.
//!
//! Every fallible operation returns one of four kinds so consumers can
//! react per kind (a sensor marks itself unavailable on `Connection`,
//! forces a re-auth on `Auth`, and so on). Nothing is retried or
//! recovered at this layer.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The credential exchange failed, or the API rejected our token
    /// (401/403). Covers "could not log in" as well as "logged in but
    /// the token was refused".
    #[error("authentication failed: {message}")]
    Auth {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Transport-level failure: timeout, connection refused, DNS.
    #[error("connection error: {0}")]
    Connection(#[from] reqwest::Error),

    /// The server answered with a structured error for a non-2xx,
    /// non-auth status.
    #[error("API error {status} [{code}]: {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },

    /// The server answered 2xx but the body did not match the expected
    /// record shape.
    #[error("unexpected response shape: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn auth(message: impl Into<String>) -> Self {
        Error::Auth { message: message.into(), source: None }
    }

    pub(crate) fn auth_with_source(message: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Auth { message: message.into(), source: Some(source) }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
