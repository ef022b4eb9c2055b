use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::delivery_dto::{CreateDeliveryRequest, DeliveryDto};
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/delivery",
    request_body = CreateDeliveryRequest,
    responses(
        (status = 201, description = "Delivery created", body = DeliveryDto),
        (status = 400, description = "Unknown product references"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn create_delivery(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateDeliveryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<DeliveryDto>>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let delivery = DeliveryService::create_delivery(&state, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            delivery,
            "Delivery created successfully",
            StatusCode::CREATED.as_u16(),
        )),
    ))
}
