use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use thiserror::Error;

trait AsStatusCode {
    fn as_status_code(&self) -> StatusCode;
}

impl AsStatusCode for sisly_store::Error {
    fn as_status_code(&self) -> StatusCode {
        match self {
            sisly_store::Error::NotFound => StatusCode::NOT_FOUND,
            sisly_store::Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("store error: {0}")]
    Store(#[from] sisly_store::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, msg) = match self {
            ApiError::Store(e) => (e.as_status_code(), e.to_string()),
        };
        let body = Json(json!({
            "error": {
                "detail": msg,
            }
        }));

        (status_code, body).into_response()
    }
}

#[utoipa::path(get, path = "/api/health", responses((status = 200, description = "Service is up")))]
pub(crate) async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

pub fn router() -> Router<crate::ServerState> {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/health", get(health))
            .nest("/public/reservations", crate::reservations::public_router())
            .nest("/admin/reservations", crate::reservations::admin_router()),
    )
}
