use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::RouteService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::RouteDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/v1/routes/{id}/complete",
    params(("id" = Uuid, Path, description = "Route id")),
    responses(
        (status = 200, description = "Route completed", body = RouteDto),
        (status = 400, description = "Route is not in progress"),
        (status = 404, description = "Route not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn complete_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<RouteDto>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let route = RouteService::complete_route(&mut conn, id)?;

    Ok(Json(ApiResponse::with_data(
        route,
        "Route completed successfully",
        StatusCode::OK.as_u16(),
    )))
}
