//! Typed client for the GitHub v3 REST API.
//!
//! Calls are described by [`Request<T>`] descriptors, built from the model
//! types ([`Repository::releases`], [`User::profile`], ...), and executed by
//! a [`Client`] bound to a [`Server`] and optional [`Credentials`].
//!
//! # Quick Start
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use tentacle::{Client, Repository, Server};
//!
//! #[tokio::main]
//! async fn main() -> tentacle::Result<()> {
//!     tentacle::set_user_agent("my-tool/1.0").ok();
//!     let client = Client::new(Server::DotCom)?;
//!     let repository = Repository::new("Carthage", "Carthage");
//!
//!     // One resource
//!     let (_, info) = client.execute_one(&repository.info()).await?;
//!     println!("{info}: {} stars", info.stargazers_count);
//!
//!     // A list, page by page
//!     let mut pages = Box::pin(client.execute_many(&repository.releases(), None, Some(30)));
//!     while let Some(page) = pages.try_next().await? {
//!         for release in &page {
//!             println!("{}", release.tag);
//!         }
//!     }
//!
//!     // A binary asset, deleted when `asset` is dropped
//!     let (_, release) = client.execute_one(&repository.release_for_tag("0.15")).await?;
//!     if let Some(pkg) = release.asset("Carthage.pkg") {
//!         let asset = client.download(pkg).await?;
//!         println!("{} bytes", asset.read().await?.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every call fails with one [`Error`]: 404 is [`Error::DoesNotExist`], other
//! 4xx/5xx statuses are [`Error::Api`], and bodies that do not decode are
//! [`Error::Deserialization`] (not JSON) or [`Error::Decoding`] (wrong shape).
//!
//! # Configuration
//!
//! [`Client::from_env`] reads `GITHUB_TOKEN`, `GITHUB_USERNAME` /
//! `GITHUB_PASSWORD`, `GITHUB_API_URL` and `GITHUB_USER_AGENT`; see
//! [`config`].

mod classify;
mod client;
pub mod config;
mod credentials;
mod decode;
mod download;
mod error;
pub mod models;
mod pagination;
mod request;
mod response;
mod server;
mod wire;

#[cfg(feature = "test-server")]
pub mod mock_server;

pub use classify::classify;
pub use client::Client;
pub use config::{Config, ConfigError};
pub use credentials::Credentials;
pub use decode::{decode_many, decode_one, iso8601, DecodeError, Resource};
pub use download::DownloadedAsset;
pub use error::{Error, NetworkError, Result};
pub use pagination::{next_page, Page, PaginationParams};
pub use request::{Method, Request};
pub use response::Response;
pub use server::Server;
pub use wire::{set_user_agent, user_agent, WireRequest, API_CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE};

pub use models::{
    Asset, Branch, Comment, Content, ContentFile, ContentType, File, FileResponse, GitHubError,
    Id, Issue, Organization, Release, Repository, RepositoryInfo, Sha, Tree, User, UserInfo,
    UserProfile,
};
