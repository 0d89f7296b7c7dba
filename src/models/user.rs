//! User and organization models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::decode::{iso8601, Resource};
use crate::models::id::Id;
use crate::models::issue::Issue;
use crate::models::repository::RepositoryInfo;
use crate::request::Request;

/// A user on GitHub, identified by login.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User {
    pub login: String,
}

impl User {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }

    fn api_path(&self) -> String {
        format!("/users/{}", urlencoding::encode(&self.login))
    }

    /// A request for this user's public profile.
    pub fn profile(&self) -> Request<UserProfile> {
        Request::get(self.api_path())
    }

    /// A request for this user's public repositories.
    pub fn repositories(&self) -> Request<Vec<RepositoryInfo>> {
        Request::get(format!("{}/repos", self.api_path()))
    }

    /// A request for the profile of the authenticated user.
    pub fn authenticated_profile() -> Request<UserProfile> {
        Request::get("/user")
    }

    /// A request for the issues assigned to the authenticated user.
    pub fn assigned_issues() -> Request<Vec<Issue>> {
        Request::get("/issues")
    }

    /// A request for the repositories of the authenticated user.
    pub fn my_repositories() -> Request<Vec<RepositoryInfo>> {
        Request::get("/user/repos")
    }

    /// A request for all public repositories, in creation order.
    pub fn public_repositories() -> Request<Vec<RepositoryInfo>> {
        Request::get("/repositories")
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.login)
    }
}

/// An organization on GitHub, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Organization {
    pub name: String,
}

impl Organization {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// A request for the organization's repositories.
    pub fn repositories(&self) -> Request<Vec<RepositoryInfo>> {
        Request::get(format!("/orgs/{}/repos", urlencoding::encode(&self.name)))
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    User,
    Organization,
    Bot,
}

/// The summary of a user that is embedded in other resources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Id<UserInfo>,

    pub login: String,

    /// The user's page on GitHub.
    #[serde(rename = "html_url")]
    pub url: Url,

    pub avatar_url: Url,

    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl UserInfo {
    /// The user this summary describes.
    pub fn user(&self) -> User {
        User::new(&self.login)
    }
}

impl Resource for UserInfo {}

/// Extended information about a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: UserInfo,

    /// When the account was created.
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub blog: Option<String>,

    #[serde(default)]
    pub company: Option<String>,
}

impl Resource for UserProfile {}
