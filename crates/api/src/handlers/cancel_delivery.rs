use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/v1/delivery/{id}/cancel",
    params(("id" = Uuid, Path, description = "Delivery id")),
    responses(
        (status = 200, description = "Delivery cancelled, route closed"),
        (status = 404, description = "Delivery not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn cancel_delivery(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    DeliveryService::cancel_delivery(&state, id).await?;

    Ok(Json(ApiResponse::message(
        "Delivery cancelled successfully",
        StatusCode::OK.as_u16(),
    )))
}
