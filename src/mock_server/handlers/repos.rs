//! Repository endpoint handlers.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, not_found, SharedState};
use crate::Repository;

/// GET /repos/{owner}/{repo}
pub async fn get_repository(
    State(state): State<SharedState>,
    Path((owner, repo)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.get_repository(&Repository::new(owner, repo)) {
        Some(info) => Json(info.clone()).into_response(),
        None => not_found(),
    }
}
