use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::auth_service::PasswordResetService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::{ForgotPasswordRequest, ResetPasswordRequest};
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "If the account exists, a reset code was sent")
    ),
    tag = "Auth"
)]
pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let message = PasswordResetService::forgot_password(&state, &payload.email).await?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset"),
        (status = 400, description = "Password does not meet requirements"),
        (status = 401, description = "Invalid or expired reset code")
    ),
    tag = "Auth"
)]
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let message = PasswordResetService::reset_password(&state, payload).await?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}
