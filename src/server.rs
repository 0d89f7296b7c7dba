//! GitHub servers.

use std::fmt;
use std::sync::LazyLock;

use url::Url;

const DOT_COM_ENDPOINT: &str = "https://api.github.com";

static DOT_COM_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DOT_COM_ENDPOINT).expect("github.com endpoint is a valid URL"));

/// A GitHub server a [`Client`](crate::Client) can talk to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Server {
    /// github.com.
    DotCom,
    /// A GitHub Enterprise instance, identified by its web URL.
    Enterprise(Url),
}

impl Server {
    /// A GitHub Enterprise server at the given URL.
    pub fn enterprise(url: Url) -> Self {
        Server::Enterprise(url)
    }

    /// The base URL of the REST API for this server, without a trailing slash.
    ///
    /// Enterprise servers serve the API under `/api/v3` on the same origin.
    pub fn endpoint(&self) -> String {
        match self {
            Server::DotCom => DOT_COM_ENDPOINT.to_string(),
            Server::Enterprise(url) => format!("{}/api/v3", url.origin().ascii_serialization()),
        }
    }

    /// [`endpoint`](Self::endpoint) as a URL that request paths are appended to.
    pub fn api_base(&self) -> Url {
        match self {
            Server::DotCom => DOT_COM_BASE.clone(),
            Server::Enterprise(url) => {
                let mut base = url.clone();
                base.set_path("/api/v3");
                base.set_query(None);
                base.set_fragment(None);
                base
            }
        }
    }
}

impl Default for Server {
    fn default() -> Self {
        Server::DotCom
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Server::DotCom => f.write_str("github.com"),
            Server::Enterprise(url) => write!(f, "{}", url.host_str().unwrap_or(url.as_str())),
        }
    }
}
