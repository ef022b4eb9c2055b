use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::auth_service::SignupService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::SignupRequest;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered, verification code sent"),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    payload.validate().map_err(|e| {
        error!("signup validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let message = SignupService::signup(&state, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message(message, StatusCode::CREATED.as_u16())),
    ))
}
