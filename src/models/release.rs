//! Release and release asset models.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::decode::Resource;
use crate::models::id::Id;
use crate::models::repository::Repository;
use crate::request::Request;

impl Repository {
    /// A request for the repository's releases.
    ///
    /// <https://docs.github.com/rest/releases/releases#list-releases>
    pub fn releases(&self) -> Request<Vec<Release>> {
        Request::get(format!("{}/releases", self.api_path()))
    }

    /// A request for the release associated with `tag`.
    ///
    /// A tag that exists but has no release is reported by the API as a
    /// plain 404, the same as a tag that does not exist.
    pub fn release_for_tag(&self, tag: &str) -> Request<Release> {
        Request::get(format!(
            "{}/releases/tags/{}",
            self.api_path(),
            urlencoding::encode(tag)
        ))
    }
}

/// A release of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Release {
    pub id: Id<Release>,

    #[serde(rename = "draft")]
    pub is_draft: bool,

    #[serde(rename = "prerelease")]
    pub is_prerelease: bool,

    /// The name of the tag the release was created from.
    #[serde(rename = "tag_name")]
    pub tag: String,

    #[serde(default)]
    pub name: Option<String>,

    /// The web page for the release.
    #[serde(rename = "html_url")]
    pub url: Url,

    pub assets: Vec<Asset>,
}

impl Release {
    /// The asset called `name`, if the release has one.
    pub fn asset(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl Resource for Release {}

/// A binary file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Asset {
    pub id: Id<Asset>,

    pub name: String,

    /// The MIME type of the file.
    pub content_type: String,

    /// The browser download URL.
    #[serde(rename = "browser_download_url")]
    pub url: Url,

    /// The API URL, used by [`Client::download`](crate::Client::download).
    #[serde(rename = "url")]
    pub api_url: Url,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl Resource for Asset {}
