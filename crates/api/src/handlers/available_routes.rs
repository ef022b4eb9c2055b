use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use entrega_core::app_state::AppState;
use entrega_core::services::RouteService;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::AvailableRouteDto;
use entrega_primitives::models::response::ApiResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/v1/routes/available",
    responses(
        (status = 200, description = "Unassigned pending routes", body = [AvailableRouteDto])
    ),
    security(("bearerAuth" = [])),
    tag = "Routes"
)]
pub async fn available_routes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<AvailableRouteDto>>>, ApiError> {
    let mut conn = state
        .db
        .get()
        .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

    let routes = RouteService::available_routes(&mut conn)?;

    Ok(Json(ApiResponse::with_data(
        routes,
        "Available routes",
        StatusCode::OK.as_u16(),
    )))
}
