//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{DateTime, TimeZone, Utc};
use url::Url;

use crate::models::{Label, State, UserType};
use crate::{Asset, Id, Issue, Release, Repository, RepositoryInfo, UserInfo, UserProfile};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap_or_else(|err| panic!("fixture URL {s} is invalid: {err}"))
}

fn date(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2016, 3, day.clamp(1, 28), 12, 0, 0)
        .single()
        .unwrap_or_default()
}

impl Fixtures {
    // =========================================================================
    // Users
    // =========================================================================

    pub fn user_info(login: &str, id: u64) -> UserInfo {
        UserInfo {
            id: Id::new(id),
            login: login.to_string(),
            url: url(&format!("https://github.com/{login}")),
            avatar_url: url(&format!("https://avatars.githubusercontent.com/u/{id}?v=4")),
            user_type: UserType::User,
        }
    }

    pub fn user_profile(login: &str, id: u64) -> UserProfile {
        UserProfile {
            user: Self::user_info(login, id),
            created_at: date(1),
            name: Some(login.to_string()),
            email: None,
            blog: None,
            company: None,
        }
    }

    // =========================================================================
    // Repositories
    // =========================================================================

    pub fn repository_info(owner: &str, name: &str, id: u64) -> RepositoryInfo {
        RepositoryInfo {
            id: Id::new(id),
            owner: Self::user_info(owner, id + 1000),
            name: name.to_string(),
            name_with_owner: format!("{owner}/{name}"),
            body: None,
            url: url(&format!("https://github.com/{owner}/{name}")),
            homepage: None,
            is_private: false,
            is_fork: false,
            forks_count: 0,
            stargazers_count: 0,
            watchers_count: 0,
            open_issues_count: 0,
            pushed_at: date(3),
            created_at: date(1),
            updated_at: date(2),
        }
    }

    // =========================================================================
    // Releases
    // =========================================================================

    /// An asset whose API URL points at github.com until the server rebases it.
    pub fn asset(id: u64, name: &str, owner: &str, repo: &str) -> Asset {
        Asset {
            id: Id::new(id),
            name: name.to_string(),
            content_type: "application/octet-stream".to_string(),
            url: url(&format!(
                "https://github.com/{owner}/{repo}/releases/download/{id}/{name}"
            )),
            api_url: url(&format!(
                "https://api.github.com/repos/{owner}/{repo}/releases/assets/{id}"
            )),
        }
    }

    pub fn release(id: u64, tag: &str, owner: &str, repo: &str, assets: Vec<Asset>) -> Release {
        Release {
            id: Id::new(id),
            is_draft: false,
            is_prerelease: false,
            tag: tag.to_string(),
            name: Some(tag.to_string()),
            url: url(&format!("https://github.com/{owner}/{repo}/releases/tag/{tag}")),
            assets,
        }
    }

    // =========================================================================
    // Issues
    // =========================================================================

    pub fn issue(id: u64, number: u64, title: &str, author: &str) -> Issue {
        Issue {
            id: Id::new(id),
            url: None,
            number,
            state: State::Open,
            title: title.to_string(),
            body: None,
            user: Some(Self::user_info(author, 1302)),
            labels: vec![Label {
                name: "bug".to_string(),
                color: "ee0701".to_string(),
            }],
            assignees: vec![],
            milestone: None,
            is_locked: false,
            comment_count: 0,
            pull_request: None,
            closed_at: None,
            created_at: date(10),
            updated_at: date(11),
        }
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// The default data set:
    ///
    /// - `Carthage/Carthage` with 31 releases; the first (`0.31`) has a
    ///   `Carthage.pkg` asset
    /// - `torvalds/linux`, which has tags but no releases
    /// - `mdiep/Tentacle` with three issues
    /// - user `mdiep`, also the authenticated user
    pub fn default_scenario() -> DefaultScenario {
        let carthage = Repository::new("Carthage", "Carthage");
        let releases = (1..=31u64)
            .rev()
            .map(|n| {
                let assets = if n == 31 {
                    vec![Self::asset(CARTHAGE_PKG_ID, "Carthage.pkg", "Carthage", "Carthage")]
                } else {
                    vec![]
                };
                Self::release(2_698_000 + n, &format!("0.{n}"), "Carthage", "Carthage", assets)
            })
            .collect();

        let tentacle = Repository::new("mdiep", "Tentacle");
        let issues = vec![
            Self::issue(1, 1, "Add releases", "mdiep"),
            Self::issue(2, 2, "Add issues", "mdiep"),
            Self::issue(3, 3, "Add downloads", "mdiep"),
        ];

        DefaultScenario {
            repositories: vec![
                Self::repository_info("Carthage", "Carthage", 23_531_614),
                Self::repository_info("torvalds", "linux", 2_325_298),
                Self::repository_info("mdiep", "Tentacle", 53_076_616),
            ],
            releases: vec![(carthage, releases)],
            asset_data: vec![(CARTHAGE_PKG_ID, CARTHAGE_PKG.to_vec())],
            issues: vec![(tentacle, issues)],
            users: vec![Self::user_profile("mdiep", 1302)],
            authenticated_login: Some("mdiep".to_string()),
        }
    }
}

/// ID of the `Carthage.pkg` asset in the default scenario.
pub const CARTHAGE_PKG_ID: u64 = 1_258_120;

/// Contents served for `Carthage.pkg`.
pub const CARTHAGE_PKG: &[u8] = b"xar!\x00\x1c\x00\x01Carthage installer package";

/// Data loaded by [`MockServer::start`](super::MockServer::start).
#[derive(Debug)]
pub struct DefaultScenario {
    pub repositories: Vec<RepositoryInfo>,
    pub releases: Vec<(Repository, Vec<Release>)>,
    pub asset_data: Vec<(u64, Vec<u8>)>,
    pub issues: Vec<(Repository, Vec<Issue>)>,
    pub users: Vec<UserProfile>,
    pub authenticated_login: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_shape() {
        let scenario = Fixtures::default_scenario();
        let (repository, releases) = &scenario.releases[0];

        assert_eq!(repository, &Repository::new("Carthage", "Carthage"));
        assert_eq!(releases.len(), 31);
        assert_eq!(releases[0].tag, "0.31");
        assert_eq!(releases[0].assets[0].id.get(), CARTHAGE_PKG_ID);
        assert_eq!(releases[30].tag, "0.1");
    }

    #[test]
    fn test_fixtures_serialize_as_github_json() {
        let json = serde_json::to_value(Fixtures::release(7, "0.15", "Carthage", "Carthage", vec![])).unwrap();
        assert_eq!(json["tag_name"], "0.15");
        assert_eq!(json["html_url"], "https://github.com/Carthage/Carthage/releases/tag/0.15");

        let json = serde_json::to_value(Fixtures::issue(1, 1, "Title", "mdiep")).unwrap();
        assert_eq!(json["created_at"], "2016-03-10T12:00:00Z");
        assert_eq!(json["closed_at"], serde_json::Value::Null);
    }
}
