use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(
    crate::api::health,
    crate::reservations::create_reservation,
    crate::reservations::list_reservations,
    crate::reservations::get_reservation,
    crate::reservations::update_reservation,
    crate::reservations::delete_reservation,
    crate::reservations::cleanup_expired,
))]
pub struct OpenApiDoc;

pub fn router() -> Router<crate::ServerState> {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(OpenApiDoc::openapi()) }),
    )
}
