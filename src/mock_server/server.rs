//! Mock GitHub API server.
//!
//! Provides an axum-based HTTP server that simulates the GitHub REST API
//! the way a GitHub Enterprise instance serves it, under `/api/v3`.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;
use crate::Server;

/// A mock GitHub API server for testing.
///
/// The server runs in the background. Point a client at it with
/// [`MockServer::server`].
pub struct MockServer {
    /// The URL where the server is listening.
    url: Url,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with the default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    ///
    /// Asset URLs in `state` are rewritten to point at this server.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = Url::parse(&format!("http://{addr}")).expect("Failed to build server URL");

        state.rebase_assets(&Server::Enterprise(url.clone()).api_base());
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// The base URL of the mock server.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The server to hand to [`Client`](crate::Client).
    pub fn server(&self) -> Server {
        Server::Enterprise(self.url.clone())
    }

    /// Access to the server's shared state, to modify data during a test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for info in scenario.repositories {
            state = state.with_repository(info);
        }
        for (repository, releases) in scenario.releases {
            state.releases.insert(repository, releases);
        }
        for (id, data) in scenario.asset_data {
            state.asset_data.insert(id, data);
        }
        for (repository, issues) in scenario.issues {
            state.issues.insert(repository, issues);
        }
        for profile in scenario.users {
            state = state.with_user(profile);
        }
        state.authenticated_login = scenario.authenticated_login;

        state
    }

    /// Create the axum router with all routes.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        let api = Router::new()
            // Repositories
            .route("/repos/:owner/:repo", get(handlers::get_repository))
            // Releases
            .route("/repos/:owner/:repo/releases", get(handlers::list_releases))
            .route(
                "/repos/:owner/:repo/releases/tags/:tag",
                get(handlers::get_release_for_tag),
            )
            .route(
                "/repos/:owner/:repo/releases/assets/:id",
                get(handlers::get_asset),
            )
            // Issues
            .route("/repos/:owner/:repo/issues", get(handlers::list_issues))
            .route("/repos/:owner/:repo/issues/:number", get(handlers::get_issue))
            // Users
            .route("/users/:login", get(handlers::get_user))
            .route("/user", get(handlers::get_authenticated_user));

        Router::new()
            .nest("/api/v3", api)
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::fixtures::{CARTHAGE_PKG, CARTHAGE_PKG_ID};
    use crate::{Client, Error, Repository, User};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        MockServer::create_router(MockServer::default_state().shared())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Body is not JSON")
    }

    #[tokio::test]
    async fn test_router_paginates_with_link_header() {
        let response = router()
            .oneshot(
                Request::get("/api/v3/repos/Carthage/Carthage/releases?per_page=30")
                    .header(header::HOST, "example.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let link = response.headers()[header::LINK].to_str().unwrap().to_string();
        assert!(link.contains(
            r#"<http://example.test/api/v3/repos/Carthage/Carthage/releases?page=2&per_page=30>; rel="next""#
        ));
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_router_last_page_has_no_link() {
        let response = router()
            .oneshot(
                Request::get("/api/v3/repos/Carthage/Carthage/releases?page=2&per_page=30")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(header::LINK).is_none());
        assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_router_missing_release_is_github_404() {
        let response = router()
            .oneshot(
                Request::get("/api/v3/repos/torvalds/linux/releases/tags/v4.4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_server_starts_and_responds() {
        let server = MockServer::start().await;

        let response = reqwest::get(server.url().join("health").unwrap())
            .await
            .expect("Failed to send request");

        assert!(response.status().is_success());
        assert_eq!(response.text().await.unwrap(), "ok");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_release_and_download_with_client() {
        let server = MockServer::start().await;
        let client = Client::new(server.server()).unwrap();
        let repository = Repository::new("Carthage", "Carthage");

        let (_, release) = client
            .execute_one(&repository.release_for_tag("0.31"))
            .await
            .expect("Failed to get release");
        let asset = release.asset("Carthage.pkg").expect("Release has no asset");
        assert_eq!(asset.id.get(), CARTHAGE_PKG_ID);

        let downloaded = client.download(asset).await.expect("Failed to download");
        assert_eq!(downloaded.read().await.unwrap(), CARTHAGE_PKG);

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_required_token() {
        let state = MockServer::default_state().with_required_token("s3cret");
        let server = MockServer::with_state(state).await;
        let profile = User::new("mdiep").profile();

        let anonymous = Client::new(server.server()).unwrap();
        let err = anonymous.execute_one(&profile).await.unwrap_err();
        assert!(matches!(err, Error::Api { status: 401, .. }));

        let client = Client::with_token(server.server(), "s3cret").unwrap();
        let (_, user) = client.execute_one(&profile).await.expect("Failed to get user");
        assert_eq!(user.user.login, "mdiep");

        server.shutdown().await;
    }

    #[tokio::test]
    async fn test_empty_server() {
        let server = MockServer::start_empty().await;
        let client = Client::new(server.server()).unwrap();

        let err = client
            .execute_one(&Repository::new("Carthage", "Carthage").info())
            .await
            .unwrap_err();
        assert!(err.is_does_not_exist());

        server.shutdown().await;
    }
}
