use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use sisly_store::reservations::{NewReservation, ReservationPatch};

use crate::api::ApiError;

#[utoipa::path(post, path = "/api/public/reservations", responses(
    (status = 201, description = "Reservation stored"),
    (status = 422, description = "Malformed email or payload")
))]
pub(crate) async fn create_reservation(
    State(state): State<crate::ServerState>,
    Json(body): Json<NewReservation>,
) -> Result<Response, ApiError> {
    let created = state.store.reservations().add(&body)?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[utoipa::path(get, path = "/api/admin/reservations", responses(
    (status = 200, description = "All reservations, newest first")
))]
pub(crate) async fn list_reservations(
    State(state): State<crate::ServerState>,
) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().list()?).into_response())
}

#[utoipa::path(get, path = "/api/admin/reservations/{id}", responses(
    (status = 200, description = "The reservation"),
    (status = 404, description = "No reservation with this id")
))]
pub(crate) async fn get_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().get(id)?).into_response())
}

#[utoipa::path(patch, path = "/api/admin/reservations/{id}", responses(
    (status = 200, description = "The updated reservation"),
    (status = 404, description = "No reservation with this id")
))]
pub(crate) async fn update_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
    Query(patch): Query<ReservationPatch>,
) -> Result<Response, ApiError> {
    Ok(Json(state.store.reservations().update(id, patch)?).into_response())
}

#[utoipa::path(delete, path = "/api/admin/reservations/{id}", responses(
    (status = 200, description = "Deletion confirmation"),
    (status = 404, description = "No reservation with this id")
))]
pub(crate) async fn delete_reservation(
    State(state): State<crate::ServerState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    state.store.reservations().delete(id)?;
    let response = Json(json!({
        "status": "ok",
        "deleted_id": id,
    }));
    Ok(response.into_response())
}

#[utoipa::path(post, path = "/api/admin/reservations/cleanup-expired", responses(
    (status = 200, description = "Counts of expired reservations removed")
))]
pub(crate) async fn cleanup_expired(
    State(state): State<crate::ServerState>,
) -> Result<Response, ApiError> {
    let summary = state.store.reservations().cleanup_expired()?;
    let response = Json(json!({
        "status": "ok",
        "to_delete": summary.to_delete,
        "deleted_count": summary.deleted,
    }));
    Ok(response.into_response())
}

pub fn public_router() -> Router<crate::ServerState> {
    Router::new().route("/", post(create_reservation))
}

pub fn admin_router() -> Router<crate::ServerState> {
    Router::new()
        .route("/", get(list_reservations))
        .route(
            "/:id",
            get(get_reservation)
                .patch(update_reservation)
                .delete(delete_reservation),
        )
        .route("/cleanup-expired", post(cleanup_expired))
}
