//! Error types for GitHub API operations.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::models::GitHubError;
use crate::response::Response;

/// Errors that can occur while executing a request against the GitHub API.
///
/// Every variant is terminal for the call that produced it. Nothing is
/// retried internally, so callers that want backoff can match on the kind
/// and decide for themselves.
#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed (connection, TLS, DNS) or a download could not
    /// be written to disk.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The response body was not valid JSON.
    #[error("failed to deserialize response: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The response body was JSON but did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] DecodeError),

    /// The API returned a structured error (4xx/5xx other than 404).
    #[error("GitHub API error ({status}): {error}")]
    Api {
        status: u16,
        response: Response,
        error: GitHubError,
    },

    /// The requested object does not exist (404).
    ///
    /// GitHub answers 404 both for a tag that does not exist and for a tag
    /// that exists but has no release; the two cases are not distinguished.
    #[error("the requested object does not exist")]
    DoesNotExist,
}

/// Transport-level failure underneath [`Error::Network`].
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP transport error.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Writing a downloaded asset failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(NetworkError::Http(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Network(NetworkError::Io(err))
    }
}

impl Error {
    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::DoesNotExist => Some(404),
            _ => None,
        }
    }

    /// Whether this error is the 404 collapse.
    pub fn is_does_not_exist(&self) -> bool {
        matches!(self, Error::DoesNotExist)
    }
}

/// Result type alias for GitHub operations.
pub type Result<T> = core::result::Result<T, Error>;
