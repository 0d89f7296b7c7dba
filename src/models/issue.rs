//! Issue model, along with the labels, milestones and comments attached to
//! issues.
//!
//! Pull requests are issues too; they carry a [`PullRequest`] link block.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::decode::{iso8601, Resource};
use crate::models::id::Id;
use crate::models::repository::Repository;
use crate::models::user::UserInfo;
use crate::request::Request;

impl Repository {
    /// A request for the repository's issues.
    pub fn issues(&self) -> Request<Vec<Issue>> {
        Request::get(format!("{}/issues", self.api_path()))
    }

    /// A request for a single issue by number.
    pub fn issue(&self, number: u64) -> Request<Issue> {
        Request::get(format!("{}/issues/{number}", self.api_path()))
    }

    /// A request for the comments on an issue.
    pub fn comments_on_issue(&self, number: u64) -> Request<Vec<Comment>> {
        Request::get(format!("{}/issues/{number}/comments", self.api_path()))
    }
}

// =============================================================================
// Issue
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: Id<Issue>,

    /// The web page for the issue.
    #[serde(rename = "html_url", default)]
    pub url: Option<Url>,

    /// The number of the issue within its repository.
    pub number: u64,

    pub state: State,

    pub title: String,

    #[serde(default)]
    pub body: Option<String>,

    /// The author.
    #[serde(default)]
    pub user: Option<UserInfo>,

    pub labels: Vec<Label>,

    pub assignees: Vec<UserInfo>,

    #[serde(default)]
    pub milestone: Option<Milestone>,

    #[serde(rename = "locked")]
    pub is_locked: bool,

    #[serde(rename = "comments")]
    pub comment_count: u64,

    /// Present only when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<PullRequest>,

    #[serde(with = "iso8601::option", default)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Resource for Issue {}

// =============================================================================
// Labels, milestones, pull request links
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,

    /// Hex RGB color without the leading `#`, e.g. `ee0701`.
    pub color: String,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Resource for Label {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: Id<Milestone>,

    pub number: u64,

    pub state: State,

    pub title: String,

    #[serde(rename = "description", default)]
    pub body: Option<String>,

    pub creator: UserInfo,

    #[serde(rename = "open_issues")]
    pub open_issue_count: u64,

    #[serde(rename = "closed_issues")]
    pub closed_issue_count: u64,

    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,

    #[serde(with = "iso8601::option", default)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(with = "iso8601::option", default)]
    pub due_on: Option<DateTime<Utc>>,

    #[serde(rename = "html_url")]
    pub url: Url,
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl Resource for Milestone {}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(rename = "html_url")]
    pub url: Url,

    pub diff_url: Url,

    pub patch_url: Url,
}

impl Resource for PullRequest {}

// =============================================================================
// Comments
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Id<Comment>,

    #[serde(rename = "html_url")]
    pub url: Url,

    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,

    pub body: String,

    #[serde(rename = "user")]
    pub author: UserInfo,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

impl Resource for Comment {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_many;
    use crate::error::Error;
    use chrono::TimeZone;

    const USER: &str = r#"{
        "login": "mdiep",
        "id": 1302,
        "avatar_url": "https://avatars.githubusercontent.com/u/1302?v=3",
        "html_url": "https://github.com/mdiep",
        "type": "User"
    }"#;

    fn issues_json() -> String {
        format!(
            r#"[
                {{
                    "id": 132942471,
                    "html_url": "https://github.com/Palleas-opensource/Sagittarius/pull/1",
                    "number": 1,
                    "title": "Add sagittarius",
                    "user": {USER},
                    "labels": [{{"id": 1, "name": "bug", "color": "ee0701", "default": true}}],
                    "state": "open",
                    "locked": false,
                    "assignees": [],
                    "milestone": {{
                        "id": 1742,
                        "number": 1,
                        "state": "open",
                        "title": "Release",
                        "description": null,
                        "creator": {USER},
                        "open_issues": 1,
                        "closed_issues": 0,
                        "created_at": "2016-01-30T21:24:07Z",
                        "updated_at": "2016-01-30T21:24:07Z",
                        "closed_at": null,
                        "due_on": "2016-02-09T08:00:00Z",
                        "html_url": "https://github.com/Palleas-opensource/Sagittarius/milestone/1"
                    }},
                    "comments": 2,
                    "created_at": "2016-02-11T02:52:43Z",
                    "updated_at": "2016-02-11T02:53:50Z",
                    "closed_at": null,
                    "pull_request": {{
                        "url": "https://api.github.com/repos/Palleas-opensource/Sagittarius/pulls/1",
                        "html_url": "https://github.com/Palleas-opensource/Sagittarius/pull/1",
                        "diff_url": "https://github.com/Palleas-opensource/Sagittarius/pull/1.diff",
                        "patch_url": "https://github.com/Palleas-opensource/Sagittarius/pull/1.patch"
                    }},
                    "body": "This adds sagittarius"
                }},
                {{
                    "id": 132942472,
                    "number": 2,
                    "title": "Crash on launch",
                    "labels": [],
                    "state": "closed",
                    "locked": true,
                    "assignees": [{USER}],
                    "comments": 0,
                    "created_at": "2016-02-12T10:00:00Z",
                    "updated_at": "2016-02-13T10:00:00Z",
                    "closed_at": "2016-02-13T10:00:00Z",
                    "body": null
                }}
            ]"#
        )
    }

    #[test]
    fn test_issue_requests() {
        let repository = Repository::new("Palleas-opensource", "Sagittarius");
        assert_eq!(repository.issues().path(), "/repos/Palleas-opensource/Sagittarius/issues");
        assert_eq!(repository.issue(1).path(), "/repos/Palleas-opensource/Sagittarius/issues/1");
        assert_eq!(
            repository.comments_on_issue(1).path(),
            "/repos/Palleas-opensource/Sagittarius/issues/1/comments"
        );
    }

    #[test]
    fn test_issues_deserialize() {
        let issues: Vec<Issue> = decode_many(issues_json().as_bytes()).unwrap();
        assert_eq!(issues.len(), 2);

        let pull = &issues[0];
        assert_eq!(pull.state, State::Open);
        assert!(pull.is_pull_request());
        assert_eq!(pull.labels[0].name, "bug");
        assert_eq!(pull.comment_count, 2);
        assert_eq!(pull.to_string(), "Add sagittarius");

        let milestone = pull.milestone.as_ref().unwrap();
        assert!(milestone.body.is_none());
        assert_eq!(
            milestone.due_on,
            Some(Utc.with_ymd_and_hms(2016, 2, 9, 8, 0, 0).unwrap())
        );

        let crash = &issues[1];
        assert_eq!(crash.state, State::Closed);
        assert!(crash.is_locked);
        assert!(crash.user.is_none());
        assert!(crash.url.is_none());
        assert!(crash.body.is_none());
        assert_eq!(crash.assignees[0].login, "mdiep");
        assert!(crash.closed_at.is_some());
    }

    #[test]
    fn test_unknown_state_is_rejected() {
        let json = issues_json().replacen(r#""state": "open","#, r#""state": "merged","#, 1);
        let err = decode_many::<Issue>(json.as_bytes()).unwrap_err();
        match err {
            Error::Decoding(decode) => assert_eq!(decode.path, "[0].state"),
            other => panic!("expected decoding error, got {other:?}"),
        }
    }

    #[test]
    fn test_comment_deserialize() {
        let json = format!(
            r#"[{{
                "id": 256396887,
                "html_url": "https://github.com/Palleas-opensource/Sagittarius/issues/1#issuecomment-256396887",
                "user": {USER},
                "created_at": "2016-10-26T17:26:58Z",
                "updated_at": "2016-10-26T17:26:58Z",
                "body": "Thanks!"
            }}]"#
        );
        let comments: Vec<Comment> = decode_many(json.as_bytes()).unwrap();
        assert_eq!(comments[0].author.login, "mdiep");
        assert_eq!(comments[0].to_string(), "Thanks!");
    }
}
