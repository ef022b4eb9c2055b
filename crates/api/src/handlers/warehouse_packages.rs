use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::DeliveryService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::delivery_dto::WarehousePackageDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/delivery/warehouse",
    responses(
        (status = 200, description = "Packages waiting in the warehouse", body = [WarehousePackageDto])
    ),
    security(("bearerAuth" = [])),
    tag = "Delivery"
)]
pub async fn warehouse_packages(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WarehousePackageDto>>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let packages = DeliveryService::warehouse_packages(&mut conn)?;

    Ok(Json(ApiResponse::with_data(
        packages,
        "Packages in warehouse",
        StatusCode::OK.as_u16(),
    )))
}
