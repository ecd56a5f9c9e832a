//! Shared error taxonomy for the persistence layer.
//!
//! Storage load failures are generally swallowed by callers (the UI degrades
//! to an empty or placeholder view with a logged warning); write failures
//! propagate so the caller can decide to alert or retry. No error here is
//! fatal to the session.

use serde_json::Value;

/// Error produced by the memo API transport and storage client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No valid session token could be obtained.
    #[error("not authenticated: no session token available")]
    Authentication,

    /// The remote call completed with a non-2xx status.
    #[error("api error: http {status}")]
    Api {
        status: u16,
        /// Response body, when one could be read.
        body: Option<Value>,
    },

    /// The request never completed (connect failure, broken transport).
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A payload could not be serialized or parsed.
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Input rejected before any network call was made.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status of an [`ClientError::Api`] error, if that's what this is.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
