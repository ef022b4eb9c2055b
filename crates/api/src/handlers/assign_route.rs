use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::RouteService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::RouteDto;
use entrega_primitives::models::response::ApiResponse;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AssignRouteQuery {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[utoipa::path(
    put,
    path = "/api/v1/routes/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Route id"),
        ("userId" = Uuid, Query, description = "Courier account id")
    ),
    responses(
        (status = 200, description = "Route assigned", body = RouteDto),
        (status = 400, description = "Route not pending, unknown user, or courier already active"),
        (status = 404, description = "Route not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn assign_route(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<AssignRouteQuery>,
) -> Result<Json<ApiResponse<RouteDto>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let route = RouteService::assign_route(&mut conn, id, query.user_id)?;

    Ok(Json(ApiResponse::with_data(
        route,
        "Route assigned successfully",
        StatusCode::OK.as_u16(),
    )))
}
