//! User endpoint handlers.

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::{authorize, error_response, not_found, SharedState};

/// GET /users/{login}
pub async fn get_user(
    State(state): State<SharedState>,
    Path(login): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.get_user(&login) {
        Some(profile) => Json(profile.clone()).into_response(),
        None => not_found(),
    }
}

/// GET /user
///
/// Always requires credentials, whether or not a token is enforced.
pub async fn get_authenticated_user(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Response {
    if !headers.contains_key(AUTHORIZATION) {
        return error_response(StatusCode::UNAUTHORIZED, "Requires authentication");
    }
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.authenticated_user() {
        Some(profile) => Json(profile.clone()).into_response(),
        None => not_found(),
    }
}
