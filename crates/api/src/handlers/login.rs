use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::auth_service::LoginService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::{LoginRequest, LoginResponse};
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials or email not verified"),
        (status = 404, description = "No account for that email")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let response = LoginService::login(&state, payload).await?;

    Ok(Json(ApiResponse::with_data(
        response,
        "Login successful",
        StatusCode::OK.as_u16(),
    )))
}
