//! Mock GitHub API server for end-to-end testing.
//!
//! An in-memory server that simulates the parts of the GitHub API this crate
//! talks to. Unlike wiremock, which mocks at the HTTP level per test, it
//! keeps state across requests: lists paginate with real `Link` headers,
//! missing objects answer 404, and assets download as binary.
//!
//! Enabled with the `test-server` feature.
//!
//! # Example
//!
//! ```ignore
//! use tentacle::mock_server::MockServer;
//! use tentacle::{Client, Repository};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = Client::new(server.server()).unwrap();
//!
//!     let releases = client
//!         .fetch_all(&Repository::new("Carthage", "Carthage").releases())
//!         .await
//!         .unwrap();
//!     assert_eq!(releases.len(), 31);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures, CARTHAGE_PKG, CARTHAGE_PKG_ID};
pub use server::MockServer;
pub use state::MockState;
