//! Turning descriptors into HTTP requests.
//!
//! A [`WireRequest`] is the fully resolved form of a [`Request`]: absolute
//! URL with query string, and the headers the API expects. Building one is
//! synchronous and does no I/O.

use std::sync::OnceLock;

use url::Url;

use crate::credentials::Credentials;
use crate::request::{Method, Request};
use crate::server::Server;

/// `Accept` value for JSON API calls.
pub const API_CONTENT_TYPE: &str = "application/vnd.github.v3+json";

/// `Accept` value for binary asset downloads.
pub const DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";

static USER_AGENT: OnceLock<String> = OnceLock::new();

/// Set the `User-Agent` sent with every request made by this process.
///
/// GitHub rejects requests without one. The value can be set once; later
/// calls leave it unchanged and hand the rejected value back.
pub fn set_user_agent(user_agent: impl Into<String>) -> Result<(), String> {
    USER_AGENT.set(user_agent.into())
}

/// The process-wide user agent, if one has been set.
pub fn user_agent() -> Option<&'static str> {
    USER_AGENT.get().map(String::as_str)
}

/// A resolved HTTP request, ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    method: Method,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<Vec<u8>>,
}

impl WireRequest {
    /// Resolve `request` against `server`.
    ///
    /// Query parameters are the descriptor's own, in order, followed by
    /// `page` and then `per_page` when given.
    pub fn build<T>(
        server: &Server,
        request: &Request<T>,
        page: Option<u32>,
        per_page: Option<u32>,
        credentials: Option<&Credentials>,
    ) -> Self {
        let mut url = server.api_base();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            request.path().trim_start_matches('/')
        );
        url.set_path(&path);

        let paging = page
            .map(|page| ("page", page.to_string()))
            .into_iter()
            .chain(per_page.map(|per_page| ("per_page", per_page.to_string())));
        let mut params = request
            .query()
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .chain(paging)
            .peekable();
        if params.peek().is_some() {
            url.query_pairs_mut().extend_pairs(params);
        }

        let mut wire = Self::with_accept(request.method(), url, API_CONTENT_TYPE, credentials);
        if let Some(body) = request.body() {
            wire.headers.push(("Content-Type", "application/json".to_string()));
            wire.body = Some(body.to_vec());
        }
        wire
    }

    /// A GET for the binary contents of `url` (a release asset's API URL).
    pub fn download(url: &Url, credentials: Option<&Credentials>) -> Self {
        Self::with_accept(Method::Get, url.clone(), DOWNLOAD_CONTENT_TYPE, credentials)
    }

    fn with_accept(
        method: Method,
        url: Url,
        accept: &str,
        credentials: Option<&Credentials>,
    ) -> Self {
        let mut headers = vec![("Accept", accept.to_string())];
        if let Some(user_agent) = user_agent() {
            headers.push(("User-Agent", user_agent.to_string()));
        }
        if let Some(credentials) = credentials {
            headers.push(("Authorization", credentials.authorization_header()));
        }
        Self {
            method,
            url,
            headers,
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &[(&'static str, String)] {
        &self.headers
    }

    /// The value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Convert into a reqwest builder on `http`.
    ///
    /// Header values are validated by reqwest; an invalid one surfaces as a
    /// transport error when the request is sent.
    pub fn into_reqwest(self, http: &reqwest::Client) -> reqwest::RequestBuilder {
        let mut builder = http.request(self.method.into(), self.url);
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = self.body {
            builder = builder.body(body);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Repository;

    fn releases() -> Request<Vec<crate::models::Release>> {
        Repository::new("Carthage", "Carthage").releases()
    }

    #[test]
    fn test_dot_com_url() {
        let wire = WireRequest::build(&Server::DotCom, &releases(), None, None, None);
        assert_eq!(
            wire.url().as_str(),
            "https://api.github.com/repos/Carthage/Carthage/releases"
        );
        assert_eq!(wire.method(), Method::Get);
        assert_eq!(wire.header("accept"), Some(API_CONTENT_TYPE));
        assert!(wire.header("Authorization").is_none());
        assert!(wire.body().is_none());
    }

    #[test]
    fn test_enterprise_url() {
        let server = Server::enterprise(Url::parse("https://git.example.com").unwrap());
        let wire = WireRequest::build(&server, &releases(), None, None, None);
        assert_eq!(
            wire.url().as_str(),
            "https://git.example.com/api/v3/repos/Carthage/Carthage/releases"
        );
    }

    #[test]
    fn test_paging_follows_descriptor_query() {
        let request: Request<Vec<crate::models::Release>> =
            Request::get_with_query("/search", [("q", "tentacle"), ("sort", "stars")]);
        let wire = WireRequest::build(&Server::DotCom, &request, Some(2), Some(30), None);
        assert_eq!(wire.url().query(), Some("q=tentacle&sort=stars&page=2&per_page=30"));

        let wire = WireRequest::build(&Server::DotCom, &releases(), None, Some(100), None);
        assert_eq!(wire.url().query(), Some("per_page=100"));

        let wire = WireRequest::build(&Server::DotCom, &releases(), None, None, None);
        assert_eq!(wire.url().query(), None);
    }

    #[test]
    fn test_authorization_headers() {
        let token = Credentials::Token("abc".to_string());
        let wire = WireRequest::build(&Server::DotCom, &releases(), None, None, Some(&token));
        assert_eq!(wire.header("Authorization"), Some("token abc"));

        let basic = Credentials::Basic {
            username: "u".to_string(),
            password: "p".to_string(),
        };
        let wire = WireRequest::build(&Server::DotCom, &releases(), None, None, Some(&basic));
        assert_eq!(wire.header("Authorization"), Some("Basic dTpw"));
    }

    #[test]
    fn test_body_is_sent_as_json() {
        let file = crate::models::File::new("Added file", "hello");
        let request = Repository::new("Palleas", "Tentacle")
            .create_file(&file, "hello.md", None)
            .unwrap();
        let wire = WireRequest::build(&Server::DotCom, &request, None, None, None);

        assert_eq!(wire.method(), Method::Put);
        assert_eq!(wire.header("Content-Type"), Some("application/json"));
        assert_eq!(wire.body(), request.body());
    }

    #[test]
    fn test_download_accepts_octet_stream() {
        let url = Url::parse("https://api.github.com/repos/Carthage/Carthage/releases/assets/1").unwrap();
        let wire = WireRequest::download(&url, None);
        assert_eq!(wire.url(), &url);
        assert_eq!(wire.header("Accept"), Some(DOWNLOAD_CONTENT_TYPE));
    }
}
