use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::auth_service::VerificationService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::{ResendVerificationRequest, VerifyEmailRequest};
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/auth/verify",
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified"),
        (status = 400, description = "Invalid or expired verification code")
    ),
    tag = "Auth"
)]
pub async fn verify_email(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let message =
        VerificationService::verify_email(&state, &payload.token, &payload.email).await?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-verification",
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "Verification code resent"),
        (status = 404, description = "No account for that email")
    ),
    tag = "Auth"
)]
pub async fn resend_verification(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ResendVerificationRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let message = VerificationService::resend_verification(&state, &payload.email).await?;

    Ok(Json(ApiResponse::message(
        message,
        StatusCode::OK.as_u16(),
    )))
}
