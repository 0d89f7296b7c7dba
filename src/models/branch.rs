use serde::{Deserialize, Serialize};

use crate::decode::Resource;
use crate::models::repository::Repository;
use crate::models::sha::Sha;
use crate::request::Request;

impl Repository {
    /// A request for the repository's branches.
    pub fn branches(&self) -> Request<Vec<Branch>> {
        Request::get(format!("{}/branches", self.api_path()))
    }
}

/// A branch and the commit at its tip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchCommit {
    pub sha: Sha,
}

impl Resource for Branch {}
