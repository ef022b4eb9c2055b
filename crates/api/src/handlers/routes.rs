use axum::extract::{Json, State};
use axum::http::StatusCode;
use entrega_core::app_state::AppState;
use entrega_core::services::RouteService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::{CreateRouteRequest, RouteDto};
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/v1/routes",
    responses(
        (status = 200, description = "All routes", body = [RouteDto])
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn list_routes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<RouteDto>>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let routes = RouteService::list_routes(&mut conn)?;

    Ok(Json(ApiResponse::with_data(
        routes,
        "Routes found",
        StatusCode::OK.as_u16(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Route created", body = RouteDto),
        (status = 400, description = "Invalid input")
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn create_route(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRouteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RouteDto>>), ApiError> {
    payload.validate().map_err(ApiError::Validation)?;

    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let route = RouteService::create_route(&mut conn, payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_data(
            route,
            "Route created successfully",
            StatusCode::CREATED.as_u16(),
        )),
    ))
}
