//! Configuration from environment variables.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `GITHUB_TOKEN` | Token credentials. Takes precedence over basic auth. |
//! | `GITHUB_USERNAME`, `GITHUB_PASSWORD` | Basic credentials; both or neither. |
//! | `GITHUB_API_URL` | GitHub Enterprise URL. Unset means github.com. |
//! | `GITHUB_USER_AGENT` | Process-wide `User-Agent`. |
//!
//! Empty values count as unset.

use std::env;

use thiserror::Error;
use url::Url;

use crate::client::Client;
use crate::credentials::Credentials;
use crate::server::Server;
use crate::wire;

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const USERNAME_VAR: &str = "GITHUB_USERNAME";
pub const PASSWORD_VAR: &str = "GITHUB_PASSWORD";
pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const USER_AGENT_VAR: &str = "GITHUB_USER_AGENT";

/// Errors building a client from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("basic auth needs both GITHUB_USERNAME and GITHUB_PASSWORD; {0} is not set")]
    IncompleteBasicAuth(&'static str),

    #[error(transparent)]
    Client(#[from] crate::Error),
}

/// Client settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server: Server,
    pub credentials: Option<Credentials>,
    pub user_agent: Option<String>,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let server = match var(API_URL_VAR) {
            Some(raw) => {
                let url = Url::parse(raw.trim()).map_err(|source| ConfigError::InvalidUrl {
                    var: API_URL_VAR,
                    source,
                })?;
                server_for(url)
            }
            None => Server::DotCom,
        };

        let credentials = match (var(TOKEN_VAR), var(USERNAME_VAR), var(PASSWORD_VAR)) {
            (Some(token), _, _) => Some(Credentials::Token(token)),
            (None, Some(username), Some(password)) => Some(Credentials::Basic { username, password }),
            (None, Some(_), None) => return Err(ConfigError::IncompleteBasicAuth(PASSWORD_VAR)),
            (None, None, Some(_)) => return Err(ConfigError::IncompleteBasicAuth(USERNAME_VAR)),
            (None, None, None) => None,
        };

        Ok(Self {
            server,
            credentials,
            user_agent: var(USER_AGENT_VAR),
        })
    }

    /// Build a client, installing the user agent process-wide if one is
    /// configured and none has been set yet.
    pub fn into_client(self) -> Result<Client, ConfigError> {
        if let Some(user_agent) = self.user_agent {
            if let Err(rejected) = wire::set_user_agent(user_agent) {
                tracing::debug!(
                    rejected = %rejected,
                    current = ?wire::user_agent(),
                    "user agent already set; keeping it"
                );
            }
        }
        Ok(Client::with_credentials(self.server, self.credentials)?)
    }
}

/// github.com URLs (web or API) mean the public server.
fn server_for(url: Url) -> Server {
    match url.host_str() {
        Some("github.com" | "api.github.com") => Server::DotCom,
        _ => Server::Enterprise(url),
    }
}
