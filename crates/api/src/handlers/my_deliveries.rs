use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use entrega_core::app_state::AppState;
use entrega_core::security::Claims;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::delivery_dto::DeliveryDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/delivery/mine",
    responses(
        (status = 200, description = "Deliveries on the caller's routes", body = [DeliveryDto])
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn my_deliveries(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<Vec<DeliveryDto>>>, ApiError> {
    let user_id = claims.user_id()?;

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let deliveries = DeliveryService::deliveries_by_user(&mut conn, user_id)?;

    Ok(Json(ApiResponse::with_data(
        deliveries,
        "Deliveries found",
        StatusCode::OK.as_u16(),
    )))
}
