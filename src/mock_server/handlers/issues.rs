//! Issue endpoint handlers.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, not_found, paginate, PageQuery, SharedState};
use crate::Repository;

/// GET /repos/{owner}/{repo}/issues
pub async fn list_issues(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    Query(query): Query<PageQuery>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let repository = Repository::new(owner, repo);
    if state.get_repository(&repository).is_none() {
        return not_found();
    }
    paginate(state.list_issues(&repository), &query, &uri, &headers)
}

/// GET /repos/{owner}/{repo}/issues/{number}
pub async fn get_issue(
    State(state): State<SharedState>,
    Path((owner, repo, number)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let issue = state
        .list_issues(&Repository::new(owner, repo))
        .iter()
        .find(|issue| issue.number == number);
    match issue {
        Some(issue) => Json(issue.clone()).into_response(),
        None => not_found(),
    }
}
