//! Git trees.
//!
//! Tree entries are discriminated by their `type` field (`blob`, `tree` or
//! `commit`); blobs and trees carry a URL, blobs a size too.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::decode::Resource;
use crate::models::repository::Repository;
use crate::models::sha::Sha;
use crate::request::Request;

impl Repository {
    /// A request for the tree at `reference` (`HEAD` if `None`), optionally
    /// including every subtree.
    pub fn tree(&self, reference: Option<&str>, recursive: bool) -> Request<Tree> {
        let reference = reference.unwrap_or("HEAD");
        let query: Vec<(&str, &str)> = if recursive {
            vec![("recursive", "1")]
        } else {
            Vec::new()
        };
        Request::get_with_query(
            format!(
                "{}/git/trees/{}",
                self.api_path(),
                urlencoding::encode(reference)
            ),
            query,
        )
    }

    /// A request that creates a tree from `entries`, optionally on top of
    /// the tree `base`.
    pub fn create_tree(
        &self,
        entries: Vec<Entry>,
        base: Option<&str>,
    ) -> serde_json::Result<Request<Tree>> {
        let payload = NewTree {
            tree: entries,
            base_tree: base.map(str::to_string),
        };
        Request::post(format!("{}/git/trees", self.api_path()), &payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tree {
    pub sha: Sha,

    /// The API URL of the tree.
    pub url: Url,

    #[serde(rename = "tree")]
    pub entries: Vec<Entry>,

    /// Whether GitHub cut the listing short.
    #[serde(rename = "truncated")]
    pub is_truncated: bool,
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

impl Resource for Tree {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryType {
    Blob { url: Url, size: u64 },
    Tree { url: Url },
    /// A submodule commit.
    Commit,
}

/// Git file modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[serde(rename = "100644")]
    File,
    #[serde(rename = "100755")]
    Executable,
    #[serde(rename = "040000")]
    Subdirectory,
    #[serde(rename = "160000")]
    Submodule,
    #[serde(rename = "120000")]
    Symlink,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEntry", into = "RawEntry")]
pub struct Entry {
    pub kind: EntryType,
    pub sha: Sha,
    pub path: String,
    pub mode: Mode,
}

impl Entry {
    pub fn new(kind: EntryType, sha: impl Into<Sha>, path: impl Into<String>, mode: Mode) -> Self {
        Self {
            kind,
            sha: sha.into(),
            path: path.into(),
            mode,
        }
    }
}

impl Resource for Entry {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Blob,
    Tree,
    Commit,
}

#[derive(Serialize, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: EntryKind,
    path: String,
    sha: Sha,
    mode: Mode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl TryFrom<RawEntry> for Entry {
    type Error = String;

    fn try_from(raw: RawEntry) -> Result<Self, Self::Error> {
        let kind = match raw.kind {
            EntryKind::Blob => EntryType::Blob {
                url: raw.url.ok_or("missing field `url` for `blob` entry")?,
                size: raw.size.ok_or("missing field `size` for `blob` entry")?,
            },
            EntryKind::Tree => EntryType::Tree {
                url: raw.url.ok_or("missing field `url` for `tree` entry")?,
            },
            EntryKind::Commit => EntryType::Commit,
        };

        Ok(Self {
            kind,
            sha: raw.sha,
            path: raw.path,
            mode: raw.mode,
        })
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let (kind, url, size) = match entry.kind {
            EntryType::Blob { url, size } => (EntryKind::Blob, Some(url), Some(size)),
            EntryType::Tree { url } => (EntryKind::Tree, Some(url), None),
            EntryType::Commit => (EntryKind::Commit, None, None),
        };
        RawEntry {
            kind,
            path: entry.path,
            sha: entry.sha,
            mode: entry.mode,
            url,
            size,
        }
    }
}

/// The payload for creating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTree {
    pub tree: Vec<Entry>,

    /// The SHA of the tree to build on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<String>,
}
