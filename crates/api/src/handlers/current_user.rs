use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use entrega_core::app_state::AppState;
use entrega_core::repositories::UserRepository;
use entrega_core::security::Claims;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::UserDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserDto),
        (status = 404, description = "Account no longer exists")
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let user_id = claims.user_id()?;

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let user = UserRepository::find_by_id(&mut conn, user_id)?
        .ok_or_else(|| ApiError::not_found("NOT_EXISTING_USER", "Account no longer exists"))?;

    Ok(Json(ApiResponse::with_data(
        UserDto::from(&user),
        "User found",
        StatusCode::OK.as_u16(),
    )))
}
