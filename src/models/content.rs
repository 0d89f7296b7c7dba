//! Repository contents: a single file, or the listing of a directory.
//!
//! The contents endpoint answers with a JSON object for files and a JSON
//! array for directories, so [`Content`] is chosen by the shape of the
//! document. Each entry is then discriminated by its `type` field.

use std::fmt;

use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::decode::Resource;
use crate::models::repository::Repository;
use crate::request::Request;

impl Repository {
    /// A request for the contents at `path`, optionally at a given ref
    /// (branch, tag or commit).
    pub fn content(&self, path: &str, reference: Option<&str>) -> Request<Content> {
        let query: Vec<(&str, &str)> = reference.map(|r| ("ref", r)).into_iter().collect();
        Request::get_with_query(
            format!("{}/contents/{}", self.api_path(), encode_path(path)),
            query,
        )
    }
}

/// Percent-encode each segment of a repository path, keeping the `/`
/// separators.
pub(crate) fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// The contents of a path in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Content {
    File(ContentFile),
    Directory(Vec<ContentFile>),
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContentVisitor;

        impl<'de> Visitor<'de> for ContentVisitor {
            type Value = Content;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a content object or an array of content objects")
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Content, A::Error> {
                ContentFile::deserialize(MapAccessDeserializer::new(map)).map(Content::File)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Content, A::Error> {
                Vec::deserialize(SeqAccessDeserializer::new(seq)).map(Content::Directory)
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}

impl Resource for Content {}

/// What kind of object a [`ContentFile`] is, with the fields that only
/// make sense for that kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    File { size: u64, download_url: Url },
    Directory,
    Symlink {
        target: Option<String>,
        download_url: Option<Url>,
    },
    /// A git submodule. Directory listings report submodules as files
    /// without a download URL, in which case `url` is unknown.
    Submodule { url: Option<String> },
}

/// An entry in a repository's contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawContentFile", into = "RawContentFile")]
pub struct ContentFile {
    pub content: ContentType,
    pub name: String,
    pub path: String,
    pub sha: String,
    /// The web page for the entry.
    pub url: Url,
}

impl fmt::Display for ContentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Resource for ContentFile {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ContentKind {
    File,
    Dir,
    Symlink,
    Submodule,
}

#[derive(Serialize, Deserialize)]
struct RawContentFile {
    #[serde(rename = "type")]
    kind: ContentKind,
    name: String,
    path: String,
    sha: String,
    html_url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    submodule_git_url: Option<String>,
}

impl TryFrom<RawContentFile> for ContentFile {
    type Error = String;

    fn try_from(raw: RawContentFile) -> Result<Self, Self::Error> {
        let content = match raw.kind {
            ContentKind::File => {
                let size = raw.size.ok_or_else(|| de_missing("size", "file"))?;
                match raw.download_url {
                    Some(download_url) => ContentType::File { size, download_url },
                    None => ContentType::Submodule { url: None },
                }
            }
            ContentKind::Dir => ContentType::Directory,
            ContentKind::Symlink => ContentType::Symlink {
                target: raw.target,
                download_url: raw.download_url,
            },
            ContentKind::Submodule => ContentType::Submodule {
                url: raw.submodule_git_url,
            },
        };

        Ok(Self {
            content,
            name: raw.name,
            path: raw.path,
            sha: raw.sha,
            url: raw.html_url,
        })
    }
}

impl From<ContentFile> for RawContentFile {
    fn from(file: ContentFile) -> Self {
        let mut raw = RawContentFile {
            kind: ContentKind::Dir,
            name: file.name,
            path: file.path,
            sha: file.sha,
            html_url: file.url,
            size: None,
            download_url: None,
            target: None,
            submodule_git_url: None,
        };
        match file.content {
            ContentType::File { size, download_url } => {
                raw.kind = ContentKind::File;
                raw.size = Some(size);
                raw.download_url = Some(download_url);
            }
            ContentType::Directory => {}
            ContentType::Symlink {
                target,
                download_url,
            } => {
                raw.kind = ContentKind::Symlink;
                raw.target = target;
                raw.download_url = download_url;
            }
            ContentType::Submodule { url } => {
                raw.kind = ContentKind::Submodule;
                raw.submodule_git_url = url;
            }
        }
        raw
    }
}

fn de_missing(field: &str, kind: &str) -> String {
    format!("missing field `{field}` for `{kind}` content")
}
