// Schedule document endpoints

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::CONTENT_LENGTH, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::constants::http;
use crate::web::AppState;

fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Return the stored schedule, or the "no data" payload with 200 before the first save
pub async fn get_data(State(state): State<AppState>) -> Response {
    match state.store.read().await {
        Ok(Some(document)) => Json(document).into_response(),
        Ok(None) => Json(json!({ "error": http::NO_DATA_MESSAGE })).into_response(),
        Err(e) => {
            error!("Failed to load schedule data: {}", e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Replace the stored schedule with the request body
///
/// Saves and store failures are logged by the store's observer.
pub async fn post_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if !headers.contains_key(CONTENT_LENGTH) {
        warn!("Rejected save without Content-Length");
        return api_error(StatusCode::BAD_REQUEST, "Missing Content-Length header");
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!("Rejected save: {}", rejection.body_text());
            return api_error(rejection.status(), rejection.body_text());
        }
    };

    match state.store.write_bytes(&body).await {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(e) if e.is_client_error() => {
            warn!("Rejected save: {}", e);
            api_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// Unknown `/api/*` path or unsupported method on a known one
pub async fn api_not_found() -> Response {
    api_error(StatusCode::NOT_FOUND, "Not found")
}

/// Static file miss, or a non-GET request outside `/api/`
pub async fn static_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
