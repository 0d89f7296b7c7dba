//! GitHub API client.
//!
//! [`Client`] binds descriptors to a server and credentials and executes
//! them. Single resources come back with their response metadata; lists
//! come back as a stream of pages that follows `Link: rel="next"` until
//! the last page.

use std::sync::Arc;

use bytes::Bytes;
use futures::stream::{self, Stream, TryStreamExt};
use tokio::io::AsyncWriteExt;

use crate::classify::{classify, error_for_status, is_error_status};
use crate::config::{Config, ConfigError};
use crate::credentials::Credentials;
use crate::decode::{decode_many, decode_one, Resource};
use crate::download::DownloadedAsset;
use crate::error::Result;
use crate::models::Asset;
use crate::pagination::{next_page, Page, PaginationParams};
use crate::request::Request;
use crate::response::Response;
use crate::server::Server;
use crate::wire::WireRequest;

/// Sent when no process-wide user agent has been set.
const DEFAULT_USER_AGENT: &str = concat!("tentacle/", env!("CARGO_PKG_VERSION"));

/// A client for a GitHub server.
///
/// This struct is cheaply cloneable; clones share the same connection pool.
///
/// # Example
///
/// ```no_run
/// use futures::TryStreamExt;
/// use tentacle::{Client, Repository, Server};
///
/// # async fn example() -> tentacle::Result<()> {
/// let client = Client::new(Server::DotCom)?;
/// let repository = Repository::new("Carthage", "Carthage");
///
/// let (_, release) = client.execute_one(&repository.release_for_tag("0.15")).await?;
/// println!("{release}");
///
/// let pages = client.execute_many(&repository.releases(), None, Some(30));
/// let pages: Vec<_> = pages.try_collect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    server: Arc<Server>,
    credentials: Option<Arc<Credentials>>,
    page_limit: Option<u32>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("server", &self.server)
            .field("authenticated", &self.is_authenticated())
            .field("page_limit", &self.page_limit)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// An unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`](crate::Error::Network) if the HTTP client
    /// cannot be initialized (e.g. no TLS backend).
    pub fn new(server: Server) -> Result<Self> {
        Self::with_credentials(server, None)
    }

    /// A client that authenticates with a personal access or OAuth token.
    pub fn with_token(server: Server, token: impl Into<String>) -> Result<Self> {
        Self::with_credentials(server, Some(Credentials::Token(token.into())))
    }

    /// A client that authenticates with username and password.
    pub fn with_basic(
        server: Server,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::with_credentials(
            server,
            Some(Credentials::Basic {
                username: username.into(),
                password: password.into(),
            }),
        )
    }

    pub fn with_credentials(server: Server, credentials: Option<Credentials>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .build()?;

        Ok(Self {
            http,
            server: Arc::new(server),
            credentials: credentials.map(Arc::new),
            page_limit: None,
        })
    }

    /// A client configured from the environment.
    ///
    /// See [`Config::from_env`] for the variables read.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Config::from_env()?.into_client()
    }

    /// Stop list streams after `pages` pages, even if more are advertised.
    ///
    /// Lists are unbounded by default.
    #[must_use]
    pub fn with_page_limit(mut self, pages: u32) -> Self {
        self.page_limit = Some(pages);
        self
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Execute a request for a single resource.
    ///
    /// # Errors
    ///
    /// - [`Error::DoesNotExist`](crate::Error::DoesNotExist) on 404
    /// - [`Error::Api`](crate::Error::Api) on any other 4xx/5xx
    /// - [`Error::Network`](crate::Error::Network) if the transport fails
    /// - [`Error::Deserialization`](crate::Error::Deserialization) or
    ///   [`Error::Decoding`](crate::Error::Decoding) if the body does not
    ///   decode as `T`
    #[tracing::instrument(skip_all, fields(method = %request.method(), path = request.path()))]
    pub async fn execute_one<T: Resource>(&self, request: &Request<T>) -> Result<(Response, T)> {
        let wire = WireRequest::build(
            &self.server,
            request,
            None,
            None,
            self.credentials.as_deref(),
        );
        let (response, body) = self.send(wire).await?;
        let value = decode_one(&body)?;
        Ok((response, value))
    }

    /// Execute a request for a list, page by page.
    ///
    /// The stream yields one [`Page`] per HTTP round trip, in page order.
    /// Pages are fetched one at a time, only when the stream is polled. It
    /// ends after the page without a `next` link, or right after the first
    /// error.
    pub fn execute_many<T>(
        &self,
        request: &Request<Vec<T>>,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> impl Stream<Item = Result<Page<T>>> + Send + 'static
    where
        T: Resource + Send + 'static,
    {
        let client = self.clone();
        let request = request.clone();
        let first = PaginationParams::new(page, per_page);

        stream::try_unfold((Some(first), 0u32), move |(params, fetched)| {
            let client = client.clone();
            let request = request.clone();
            async move {
                let Some(params) = params else {
                    return Ok(None);
                };
                if let Some(limit) = client.page_limit {
                    if fetched >= limit {
                        tracing::warn!(
                            path = request.path(),
                            limit,
                            "page limit reached; remaining pages were not fetched"
                        );
                        return Ok(None);
                    }
                }

                let page = client.fetch_page(&request, params).await?;
                let next = next_page(params, &page.response);
                Ok(Some((page, (next, fetched + 1))))
            }
        })
    }

    /// Fetch every page of a list and concatenate the items.
    pub async fn fetch_all<T>(&self, request: &Request<Vec<T>>) -> Result<Vec<T>>
    where
        T: Resource + Send + 'static,
    {
        self.execute_many(request, None, None)
            .try_fold(Vec::new(), |mut all, page| async move {
                all.extend(page.items);
                Ok(all)
            })
            .await
    }

    /// Download a release asset to a temporary file.
    ///
    /// The file is deleted when the returned [`DownloadedAsset`] is dropped,
    /// or as soon as this future is dropped if the download does not
    /// complete.
    ///
    /// # Errors
    ///
    /// Error statuses are classified as for any other call. Failures while
    /// transferring or writing the file are reported as
    /// [`Error::Network`](crate::Error::Network).
    #[tracing::instrument(skip_all, fields(asset = %asset.name, url = %asset.api_url))]
    pub async fn download(&self, asset: &Asset) -> Result<DownloadedAsset> {
        let wire = WireRequest::download(&asset.api_url, self.credentials.as_deref());
        let mut http_response = wire.into_reqwest(&self.http).send().await?;
        let status = http_response.status().as_u16();
        let response = Response::from_header_map(http_response.headers());

        if is_error_status(status) {
            let body = http_response.bytes().await?;
            return Err(error_for_status(status, &body, response));
        }

        let temp = tempfile::Builder::new().prefix("tentacle-").tempfile()?;
        let mut file = tokio::fs::File::from_std(temp.reopen()?);
        let mut written: u64 = 0;
        while let Some(chunk) = http_response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(bytes = written, path = %temp.path().display(), "asset downloaded");
        Ok(DownloadedAsset::new(temp, response))
    }

    #[tracing::instrument(skip_all, fields(path = request.path(), page = ?params.page))]
    async fn fetch_page<T: Resource>(
        &self,
        request: &Request<Vec<T>>,
        params: PaginationParams,
    ) -> Result<Page<T>> {
        let wire = WireRequest::build(
            &self.server,
            request,
            params.page,
            params.per_page,
            self.credentials.as_deref(),
        );
        let (response, body) = self.send(wire).await?;
        let items = decode_many(&body)?;
        let page = Page::new(response, items, params);

        tracing::debug!(items = page.len(), has_more = page.has_more(), "fetched page");
        Ok(page)
    }

    async fn send(&self, wire: WireRequest) -> Result<(Response, Bytes)> {
        let http_response = wire.into_reqwest(&self.http).send().await?;
        let status = http_response.status().as_u16();
        let response = Response::from_header_map(http_response.headers());
        let body = http_response.bytes().await?;
        classify(status, body, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_client_debug_hides_credentials() {
        let client = Client::with_token(Server::DotCom, "s3cret-token").unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("Client"));
        assert!(debug.contains("authenticated: true"));
        assert!(!debug.contains("s3cret-token"));
    }

    #[test]
    fn test_is_authenticated() {
        assert!(!Client::new(Server::DotCom).unwrap().is_authenticated());
        assert!(Client::with_basic(Server::DotCom, "u", "p")
            .unwrap()
            .is_authenticated());
    }

    #[test]
    fn test_server_is_kept() {
        let url = Url::parse("https://git.example.com").unwrap();
        let client = Client::new(Server::enterprise(url.clone())).unwrap();
        assert_eq!(client.server(), &Server::Enterprise(url));
    }

    #[test]
    fn test_page_limit_is_opt_in() {
        let client = Client::new(Server::DotCom).unwrap();
        assert_eq!(client.page_limit, None);
        assert_eq!(client.with_page_limit(3).page_limit, Some(3));
    }
}
