use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::RouteService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::RouteDto;
use entrega_primitives::models::enum_types::RouteStatus;
use entrega_primitives::models::response::ApiResponse;
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UserRoutesQuery {
    pub status: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/routes/user/{id}",
    params(
        ("id" = Uuid, Path, description = "Courier account id"),
        ("status" = Option<String>, Query, description = "Optional status filter, e.g. INITIATED")
    ),
    responses(
        (status = 200, description = "Routes assigned to the courier", body = [RouteDto]),
        (status = 400, description = "Unknown status filter")
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn user_routes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<UserRoutesQuery>,
) -> Result<Json<ApiResponse<Vec<RouteDto>>>, ApiError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(RouteStatus::from_str(raw).map_err(|_| {
            ApiError::invalid_state("INVALID_ROUTE_REQUEST", format!("Unknown status: {}", raw))
        })?),
        None => None,
    };

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let routes = RouteService::routes_by_user(&mut conn, id, status)?;

    Ok(Json(ApiResponse::with_data(
        routes,
        "Routes found",
        StatusCode::OK.as_u16(),
    )))
}
