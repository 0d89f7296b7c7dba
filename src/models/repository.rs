//! Repository model.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::decode::{iso8601, Resource};
use crate::models::id::Id;
use crate::models::user::UserInfo;
use crate::request::Request;

/// A repository on GitHub, identified by owner and name.
///
/// Comparison is case-insensitive, as it is on GitHub. Request descriptors
/// for the repository's resources (releases, issues, contents, ...) are
/// defined alongside each resource type.
#[derive(Debug, Clone)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The API path prefix for this repository (`/repos/{owner}/{name}`).
    pub(crate) fn api_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            urlencoding::encode(&self.owner),
            urlencoding::encode(&self.name)
        )
    }

    /// A request for the repository's metadata.
    ///
    /// <https://docs.github.com/rest/repos/repos#get-a-repository>
    pub fn info(&self) -> Request<RepositoryInfo> {
        Request::get(self.api_path())
    }
}

impl PartialEq for Repository {
    fn eq(&self, other: &Self) -> bool {
        self.owner.eq_ignore_ascii_case(&other.owner) && self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Repository {}

impl Hash for Repository {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.to_ascii_lowercase().hash(state);
        self.name.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Metadata about a repository, as returned by the repository listing
/// endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// The unique ID of the repository.
    pub id: Id<RepositoryInfo>,

    /// The user or organization that owns the repository.
    pub owner: UserInfo,

    /// The name of the repository.
    pub name: String,

    /// The name prefixed with the owner, e.g. `mdiep/Tentacle`.
    #[serde(rename = "full_name")]
    pub name_with_owner: String,

    /// The description of the repository.
    #[serde(rename = "description", default)]
    pub body: Option<String>,

    /// The web URL of the repository.
    #[serde(rename = "html_url")]
    pub url: Url,

    /// The homepage, when one is set and is a valid URL.
    #[serde(default, deserialize_with = "lenient_url")]
    pub homepage: Option<Url>,

    #[serde(rename = "private")]
    pub is_private: bool,

    #[serde(rename = "fork")]
    pub is_fork: bool,

    pub forks_count: u64,

    pub stargazers_count: u64,

    pub watchers_count: u64,

    pub open_issues_count: u64,

    /// When the last push happened.
    #[serde(with = "iso8601")]
    pub pushed_at: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl fmt::Display for RepositoryInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name_with_owner)
    }
}

impl Resource for RepositoryInfo {}

/// GitHub does not validate homepages; anything that is not a URL is dropped.
fn lenient_url<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Url>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| Url::parse(&s).ok()))
}
