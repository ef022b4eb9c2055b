use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::delivery_dto::DeliveryDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/v1/delivery/{id}",
    params(("id" = Uuid, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery detail", body = DeliveryDto),
        (status = 404, description = "Delivery not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn get_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeliveryDto>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let delivery = DeliveryService::get_delivery(&mut conn, id)?;

    Ok(Json(ApiResponse::with_data(
        delivery,
        "Delivery found",
        StatusCode::OK.as_u16(),
    )))
}
