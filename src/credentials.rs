//! Credentials for the GitHub API.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// How a [`Client`](crate::Client) authenticates.
///
/// An unauthenticated client simply holds no credentials. Secrets never
/// appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// A personal access or OAuth token.
    Token(String),
    /// Username and password, sent as HTTP Basic auth.
    Basic { username: String, password: String },
}

impl Credentials {
    /// The value of the `Authorization` header for these credentials.
    pub fn authorization_header(&self) -> String {
        match self {
            Credentials::Token(token) => format!("token {token}"),
            Credentials::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                format!("Basic {encoded}")
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token(_) => f.debug_tuple("Token").field(&"<redacted>").finish(),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}
