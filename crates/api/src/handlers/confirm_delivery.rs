use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ConfirmDeliveryQuery {
    pub pin: String,
}

#[utoipa::path(
    put,
    path = "/api/v1/delivery/{id}/confirm",
    params(
        ("id" = Uuid, Path, description = "Delivery id"),
        ("pin" = String, Query, description = "Delivery PIN")
    ),
    responses(
        (status = 204, description = "Delivery confirmed, route completed"),
        (status = 400, description = "Invalid pin"),
        (status = 404, description = "Delivery not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn confirm_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ConfirmDeliveryQuery>,
) -> Result<StatusCode, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    DeliveryService::confirm_delivery(&mut conn, id, &query.pin)?;

    Ok(StatusCode::NO_CONTENT)
}
