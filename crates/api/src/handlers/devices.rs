use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::Extension;
use entrega_core::app_state::AppState;
use entrega_core::security::Claims;
use entrega_core::services::DeviceService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::device_dto::LinkDeviceRequest;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/devices/link",
    request_body = LinkDeviceRequest,
    responses(
        (status = 200, description = "Device linked to the caller's account")
    ),
    security(("bearerAuth" = [])),
    tag = "Devices"
)]
pub async fn link_device(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<LinkDeviceRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;
    let user_id = claims.user_id()?;

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let message = DeviceService::link_device(&mut conn, user_id, &payload.device_token)?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/devices/unlink",
    request_body = LinkDeviceRequest,
    responses(
        (status = 200, description = "Device unlinked from the caller's account")
    ),
    security(("bearerAuth" = [])),
    tag = "Devices"
)]
pub async fn unlink_device(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<LinkDeviceRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;
    let user_id = claims.user_id()?;

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let message = DeviceService::unlink_device(&mut conn, user_id, &payload.device_token)?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}
