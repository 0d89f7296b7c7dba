//! Creating files in a repository, and the commit that results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::base64::Base64;
use serde_with::serde_as;
use url::Url;

use crate::decode::{iso8601, Resource};
use crate::models::content::{encode_path, ContentFile};
use crate::models::repository::Repository;
use crate::models::sha::Sha;
use crate::request::Request;

impl Repository {
    /// A request that creates `file` at `path`, optionally on `branch`.
    ///
    /// Fails only if the file cannot be encoded as JSON.
    pub fn create_file(
        &self,
        file: &File,
        path: &str,
        branch: Option<&str>,
    ) -> serde_json::Result<Request<FileResponse>> {
        let query = branch
            .map(|branch| ("branch".to_string(), branch.to_string()))
            .into_iter()
            .collect();
        Request::put(
            format!("{}/contents/{}", self.api_path(), encode_path(path)),
            query,
            file,
        )
    }
}

/// The name and email recorded on a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// A file to commit. `content` is sent base64-encoded.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct File {
    /// The commit message.
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committer: Option<Author>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde_as(as = "Base64")]
    pub content: Vec<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

impl File {
    pub fn new(message: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            message: message.into(),
            committer: None,
            author: None,
            content: content.into(),
            branch: None,
        }
    }
}

impl Resource for File {}

/// The result of creating a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResponse {
    pub content: ContentFile,
    pub commit: Commit,
}

impl Resource for FileResponse {}

/// A git commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: Sha,
    pub author: CommitAuthor,
    pub committer: CommitAuthor,
    pub message: String,
    #[serde(rename = "html_url")]
    pub url: Url,
    pub parents: Vec<Parent>,
}

impl Resource for Commit {}

/// An author or committer, with the time they acted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitAuthor {
    #[serde(with = "iso8601")]
    pub date: DateTime<Utc>,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parent {
    pub url: Url,
    pub sha: Sha,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_one;
    use crate::models::content::ContentType;
    use crate::request::Method;

    fn palleas() -> Author {
        Author::new("Romain Pouclet", "romain.pouclet@gmail.com")
    }

    #[test]
    fn test_file_encodes_content_as_base64() {
        let file = File::new("Added file", "This is the content of my file");
        let json: serde_json::Value = serde_json::to_value(&file).unwrap();
        assert_eq!(json["content"], "VGhpcyBpcyB0aGUgY29udGVudCBvZiBteSBmaWxl");
        assert!(json.get("branch").is_none());
        assert!(json.get("author").is_none());
    }

    #[test]
    fn test_file_survives_encoding() {
        let mut file = File::new("Added file", vec![0u8, 159, 146, 150, 255]);
        file.committer = Some(palleas());
        file.author = Some(palleas());
        file.branch = Some("master".into());

        let encoded = serde_json::to_vec(&file).unwrap();
        let decoded: File = decode_one(&encoded).unwrap();
        assert_eq!(decoded, file);
    }

    #[test]
    fn test_create_file_request_carries_the_file() {
        let repository = Repository::new("Palleas", "Tentacle");
        let file = File::new("Added file", "hello");
        let request = repository
            .create_file(&file, "docs/hello.md", Some("master"))
            .unwrap();

        assert_eq!(request.method(), Method::Put);
        assert_eq!(request.path(), "/repos/Palleas/Tentacle/contents/docs/hello.md");
        assert_eq!(request.query(), [("branch".to_string(), "master".to_string())]);

        let body: File = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(body, file);
    }

    #[test]
    fn test_file_response_deserialize() {
        let json = r#"{
            "content": {
                "name": "hello.md",
                "path": "docs/hello.md",
                "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3",
                "size": 5,
                "url": "https://api.github.com/repos/Palleas/Tentacle/contents/docs/hello.md",
                "html_url": "https://github.com/Palleas/Tentacle/blob/master/docs/hello.md",
                "download_url": "https://raw.githubusercontent.com/Palleas/Tentacle/master/docs/hello.md",
                "type": "file"
            },
            "commit": {
                "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
                "html_url": "https://github.com/Palleas/Tentacle/git/commit/7638417db6d59f3c431d3e1f261cc637155684cd",
                "author": {"date": "2014-11-07T22:01:45Z", "name": "Romain Pouclet", "email": "romain.pouclet@gmail.com"},
                "committer": {"date": "2014-11-07T22:01:45Z", "name": "Romain Pouclet", "email": "romain.pouclet@gmail.com"},
                "message": "Added file",
                "parents": [
                    {
                        "url": "https://api.github.com/repos/Palleas/Tentacle/git/commits/1acc419d4d6a9ce985db7be48c6349a0475975b5",
                        "sha": "1acc419d4d6a9ce985db7be48c6349a0475975b5"
                    }
                ]
            }
        }"#;

        let response: FileResponse = decode_one(json.as_bytes()).unwrap();
        assert_eq!(response.content.path, "docs/hello.md");
        assert!(matches!(response.content.content, ContentType::File { size: 5, .. }));
        assert_eq!(response.commit.sha, Sha::new("7638417db6d59f3c431d3e1f261cc637155684cd"));
        assert_eq!(response.commit.parents.len(), 1);
        assert_eq!(response.commit.author.name, "Romain Pouclet");
    }
}
