use crate::repositories::{RouteRepository, UserRepository};
use diesel::PgConnection;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::route_dto::{AvailableRouteDto, CreateRouteRequest, RouteDto};
use entrega_primitives::models::entities::route::NewRoute;
use entrega_primitives::models::enum_types::RouteStatus;
use tracing::info;
use uuid::Uuid;

pub struct RouteService;

impl RouteService {
    pub fn create_route(
        conn: &mut PgConnection,
        payload: CreateRouteRequest,
    ) -> Result<RouteDto, ApiError> {
        let route = RouteRepository::create(
            conn,
            NewRoute {
                description: payload.description.as_deref(),
                destination_latitude: payload.destination_latitude,
                destination_longitude: payload.destination_longitude,
                status: RouteStatus::Pending,
            },
        )?;

        Ok(RouteDto::from_parts(&route, None))
    }

    /// PENDING-or-nothing claim. The status predicate executes inside the
    /// UPDATE, so when two couriers race for the same route exactly one
    /// wins and the other observes the invalid-state rejection.
    pub fn assign_route(
        conn: &mut PgConnection,
        route_id: Uuid,
        user_id: Uuid,
    ) -> Result<RouteDto, ApiError> {
        let route = RouteRepository::find_by_id(conn, route_id)?
            .ok_or_else(|| ApiError::not_found("ROUTE_NOT_FOUND", "Route not found"))?;

        if route.status != RouteStatus::Pending {
            return Err(ApiError::invalid_state(
                "INVALID_ROUTE_REQUEST",
                "Route cannot be assigned in its current status",
            ));
        }

        let user = UserRepository::find_by_id(conn, user_id)?
            .ok_or_else(|| ApiError::invalid_state("USER_NOT_FOUND", "User does not exist"))?;

        if RouteRepository::has_initiated_route(conn, user_id)? {
            return Err(ApiError::invalid_state(
                "ALREADY_ACTIVE_ROUTE",
                "Courier already has an active route",
            ));
        }

        let claimed = RouteRepository::claim_pending(conn, route_id, user_id)?.ok_or_else(|| {
            // Lost the race: someone else claimed between the read and the
            // guarded update.
            ApiError::invalid_state(
                "INVALID_ROUTE_REQUEST",
                "Route cannot be assigned in its current status",
            )
        })?;

        info!(route_id = %claimed.id, user_id = %user.id, "route assigned");

        Ok(RouteDto::from_parts(&claimed, Some(&user.email)))
    }

    pub fn complete_route(conn: &mut PgConnection, route_id: Uuid) -> Result<RouteDto, ApiError> {
        let route = RouteRepository::find_by_id(conn, route_id)?
            .ok_or_else(|| ApiError::not_found("ROUTE_NOT_FOUND", "Route not found"))?;

        let completed =
            RouteRepository::complete_initiated(conn, route.id)?.ok_or_else(|| {
                ApiError::invalid_state(
                    "INVALID_ROUTE_REQUEST",
                    "Route cannot be completed in its current status",
                )
            })?;

        info!(route_id = %completed.id, "route completed");

        let email = Self::assignee_email(conn, &completed)?;
        Ok(RouteDto::from_parts(&completed, email.as_deref()))
    }

    pub fn list_routes(conn: &mut PgConnection) -> Result<Vec<RouteDto>, ApiError> {
        let rows = RouteRepository::list_all(conn)?;
        Ok(rows
            .iter()
            .map(|(route, email)| RouteDto::from_parts(route, email.as_deref()))
            .collect())
    }

    pub fn routes_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        status: Option<RouteStatus>,
    ) -> Result<Vec<RouteDto>, ApiError> {
        let email = UserRepository::find_by_id(conn, user_id)?.map(|u| u.email);
        let routes = RouteRepository::list_by_user(conn, user_id, status)?;
        Ok(routes
            .iter()
            .map(|route| RouteDto::from_parts(route, email.as_deref()))
            .collect())
    }

    pub fn available_routes(conn: &mut PgConnection) -> Result<Vec<AvailableRouteDto>, ApiError> {
        let routes = RouteRepository::list_available(conn)?;
        Ok(routes.iter().map(AvailableRouteDto::from).collect())
    }

    fn assignee_email(
        conn: &mut PgConnection,
        route: &entrega_primitives::models::entities::route::Route,
    ) -> Result<Option<String>, ApiError> {
        match route.assigned_to {
            Some(user_id) => Ok(UserRepository::find_by_id(conn, user_id)?.map(|u| u.email)),
            None => Ok(None),
        }
    }
}
