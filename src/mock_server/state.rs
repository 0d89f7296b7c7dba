//! Mock server state management.
//!
//! Provides the in-memory data store for the mock GitHub API server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use url::Url;

use crate::{Issue, Release, Repository, RepositoryInfo, UserProfile};

/// Shared state for the mock server.
///
/// Wrapped in `Arc<RwLock<_>>` for concurrent access by the handlers.
#[derive(Debug, Default)]
pub struct MockState {
    /// Repository metadata.
    pub repositories: HashMap<Repository, RepositoryInfo>,

    /// Releases per repository, newest first as GitHub lists them.
    pub releases: HashMap<Repository, Vec<Release>>,

    /// Binary contents of release assets, by asset ID.
    pub asset_data: HashMap<u64, Vec<u8>>,

    /// Issues per repository.
    pub issues: HashMap<Repository, Vec<Issue>>,

    /// User profiles indexed by lowercased login.
    pub users: HashMap<String, UserProfile>,

    /// Login served by `GET /user`.
    pub authenticated_login: Option<String>,

    /// Optional token. If set, requests must send `Authorization: token <it>`.
    pub required_token: Option<String>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_repository(mut self, info: RepositoryInfo) -> Self {
        let repository = Repository::new(&info.owner.login, &info.name);
        self.repositories.insert(repository, info);
        self
    }

    /// Add a release to `repository`, after any already present.
    pub fn with_release(mut self, repository: &Repository, release: Release) -> Self {
        self.releases
            .entry(repository.clone())
            .or_default()
            .push(release);
        self
    }

    pub fn with_asset_data(mut self, asset_id: u64, data: impl Into<Vec<u8>>) -> Self {
        self.asset_data.insert(asset_id, data.into());
        self
    }

    pub fn with_issue(mut self, repository: &Repository, issue: Issue) -> Self {
        self.issues.entry(repository.clone()).or_default().push(issue);
        self
    }

    pub fn with_user(mut self, profile: UserProfile) -> Self {
        self.users
            .insert(profile.user.login.to_ascii_lowercase(), profile);
        self
    }

    /// Make `login` the user returned by `GET /user`.
    pub fn with_authenticated_user(mut self, login: &str) -> Self {
        self.authenticated_login = Some(login.to_string());
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub fn get_repository(&self, repository: &Repository) -> Option<&RepositoryInfo> {
        self.repositories.get(repository)
    }

    pub fn list_releases(&self, repository: &Repository) -> &[Release] {
        self.releases
            .get(repository)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The release for `tag`. Tags without a release are indistinguishable
    /// from tags that do not exist.
    pub fn release_for_tag(&self, repository: &Repository, tag: &str) -> Option<&Release> {
        self.list_releases(repository)
            .iter()
            .find(|release| release.tag == tag)
    }

    pub fn get_asset_data(&self, asset_id: u64) -> Option<&[u8]> {
        self.asset_data.get(&asset_id).map(Vec::as_slice)
    }

    pub fn list_issues(&self, repository: &Repository) -> &[Issue] {
        self.issues
            .get(repository)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_user(&self, login: &str) -> Option<&UserProfile> {
        self.users.get(&login.to_ascii_lowercase())
    }

    pub fn authenticated_user(&self) -> Option<&UserProfile> {
        self.authenticated_login
            .as_deref()
            .and_then(|login| self.get_user(login))
    }

    /// Point every asset's API URL at `base`, the server's API root
    /// (`http://127.0.0.1:port/api/v3`).
    pub fn rebase_assets(&mut self, base: &Url) {
        for (repository, releases) in &mut self.releases {
            for asset in releases.iter_mut().flat_map(|release| release.assets.iter_mut()) {
                let mut url = base.clone();
                url.set_path(&format!(
                    "{}/repos/{}/{}/releases/assets/{}",
                    base.path().trim_end_matches('/'),
                    repository.owner,
                    repository.name,
                    asset.id
                ));
                asset.api_url = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;

    #[test]
    fn test_repository_lookup_is_case_insensitive() {
        let state = MockState::new().with_repository(Fixtures::repository_info("Carthage", "Carthage", 1));

        assert!(state
            .get_repository(&Repository::new("carthage", "carthage"))
            .is_some());
        assert!(state
            .get_repository(&Repository::new("carthage", "other"))
            .is_none());
    }

    #[test]
    fn test_release_for_tag() {
        let repository = Repository::new("Carthage", "Carthage");
        let state = MockState::new()
            .with_release(&repository, Fixtures::release(1, "0.15", "Carthage", "Carthage", vec![]))
            .with_release(&repository, Fixtures::release(2, "0.14", "Carthage", "Carthage", vec![]));

        assert_eq!(state.list_releases(&repository).len(), 2);
        assert_eq!(state.release_for_tag(&repository, "0.14").unwrap().id.get(), 2);
        assert!(state.release_for_tag(&repository, "0.13").is_none());
        assert!(state
            .list_releases(&Repository::new("torvalds", "linux"))
            .is_empty());
    }

    #[test]
    fn test_rebase_assets() {
        let repository = Repository::new("Carthage", "Carthage");
        let asset = Fixtures::asset(42, "Carthage.pkg", "Carthage", "Carthage");
        let mut state = MockState::new().with_release(
            &repository,
            Fixtures::release(1, "0.15", "Carthage", "Carthage", vec![asset]),
        );

        state.rebase_assets(&Url::parse("http://127.0.0.1:4000/api/v3").unwrap());

        let release = state.release_for_tag(&repository, "0.15").unwrap();
        assert_eq!(
            release.assets[0].api_url.as_str(),
            "http://127.0.0.1:4000/api/v3/repos/Carthage/Carthage/releases/assets/42"
        );
    }

    #[test]
    fn test_authenticated_user() {
        let state = MockState::new()
            .with_user(Fixtures::user_profile("mdiep", 1302))
            .with_authenticated_user("MDIEP");
        assert_eq!(state.authenticated_user().unwrap().user.login, "mdiep");
    }
}
