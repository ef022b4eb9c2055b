use axum::http::StatusCode;
use axum::Json;
use entrega_primitives::models::response::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health_check() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("ok", StatusCode::OK.as_u16()))
}
