//! Release and asset endpoint handlers.

use axum::{
    extract::{OriginalUri, Path, Query, State},
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, not_found, paginate, PageQuery, SharedState};
use crate::{Repository, DOWNLOAD_CONTENT_TYPE};

/// GET /repos/{owner}/{repo}/releases
pub async fn list_releases(
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
    paginate(state.list_releases(&repository), &query, &uri, &headers)
}

/// GET /repos/{owner}/{repo}/releases/tags/{tag}
pub async fn get_release_for_tag(
    State(state): State<SharedState>,
    Path((owner, repo, tag)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.release_for_tag(&Repository::new(owner, repo), &tag) {
        Some(release) => Json(release.clone()).into_response(),
        None => not_found(),
    }
}

/// GET /repos/{owner}/{repo}/releases/assets/{id}
///
/// Serves the binary when `Accept: application/octet-stream`, the asset's
/// JSON otherwise.
pub async fn get_asset(
    State(state): State<SharedState>,
    Path((owner, repo, id)): Path<(String, String, u64)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let wants_binary = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(DOWNLOAD_CONTENT_TYPE));

    if wants_binary {
        return match state.get_asset_data(id) {
            Some(data) => (
                StatusCode::OK,
                [(CONTENT_TYPE, DOWNLOAD_CONTENT_TYPE)],
                data.to_vec(),
            )
                .into_response(),
            None => not_found(),
        };
    }

    let asset = state
        .list_releases(&Repository::new(owner, repo))
        .iter()
        .flat_map(|release| release.assets.iter())
        .find(|asset| asset.id.get() == id);
    match asset {
        Some(asset) => Json(asset.clone()).into_response(),
        None => not_found(),
    }
}
