//! HTTP request handlers for the mock server.

pub mod issues;
pub mod releases;
pub mod repos;
pub mod users;

pub use issues::*;
pub use releases::*;
pub use repos::*;
pub use users::*;

use std::sync::Arc;

use axum::{
    http::{
        header::{AUTHORIZATION, HOST, LINK},
        HeaderMap, HeaderValue, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

pub type SharedState = Arc<RwLock<MockState>>;

/// GitHub's page size when `per_page` is not given.
const DEFAULT_PER_PAGE: u32 = 30;
const MAX_PER_PAGE: u32 = 100;

/// `page` / `per_page` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// A GitHub-style error body: `{"message": ..., "documentation_url": ...}`.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "message": message,
            "documentation_url": "https://docs.github.com/rest"
        })),
    )
        .into_response()
}

pub fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not Found")
}

/// Check the `Authorization` header against the required token, if any.
pub fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let Some(required) = &state.required_token else {
        return Ok(());
    };
    let expected = format!("token {required}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(error_response(StatusCode::UNAUTHORIZED, "Bad credentials")),
        None => Err(error_response(StatusCode::UNAUTHORIZED, "Requires authentication")),
    }
}

/// Serve one page of `items`, with a `Link` header advertising the next
/// and last pages when there are more.
pub fn paginate<T: Serialize + Clone>(
    items: &[T],
    query: &PageQuery,
    uri: &Uri,
    headers: &HeaderMap,
) -> Response {
    let per_page = query.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE) as usize;
    let page = query.page.unwrap_or(1).max(1) as usize;

    let slice: Vec<T> = items
        .iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .cloned()
        .collect();
    let last = items.len().div_ceil(per_page).max(1);

    let mut response = Json(slice).into_response();
    if page < last {
        let host = headers
            .get(HOST)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("localhost");
        let base = format!("http://{host}{}", uri.path());
        let link = format!(
            r#"<{base}?page={next}&per_page={per_page}>; rel="next", <{base}?page={last}&per_page={per_page}>; rel="last""#,
            next = page + 1,
        );
        if let Ok(value) = HeaderValue::from_str(&link) {
            response.headers_mut().insert(LINK, value);
        }
    }
    response
}
