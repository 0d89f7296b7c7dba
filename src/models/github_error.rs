//! The structured error body returned by the API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decode::Resource;

/// An error returned by the GitHub API, e.g. `{"message": "Validation Failed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GitHubError {
    /// The error message from the API.
    pub message: String,
}

impl GitHubError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for GitHubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for GitHubError {}

impl Resource for GitHubError {}
