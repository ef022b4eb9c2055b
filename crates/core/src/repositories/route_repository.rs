use chrono::Utc;
use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::route::{NewRoute, Route};
use entrega_primitives::models::enum_types::RouteStatus;
use entrega_primitives::schema::{routes, users};
use uuid::Uuid;

pub struct RouteRepository;

impl RouteRepository {
    pub fn create(conn: &mut PgConnection, new_route: NewRoute) -> Result<Route, ApiError> {
        diesel::insert_into(routes::table)
            .values(&new_route)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_id(conn: &mut PgConnection, route_id: Uuid) -> Result<Option<Route>, ApiError> {
        routes::table
            .find(route_id)
            .select(Route::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Claims a PENDING route for a courier. The status predicate rides in
    /// the UPDATE itself, so two concurrent claims serialize at the store
    /// and exactly one sees a row come back.
    pub fn claim_pending(
        conn: &mut PgConnection,
        route_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Route>, ApiError> {
        diesel::update(
            routes::table
                .filter(routes::id.eq(route_id))
                .filter(routes::status.eq(RouteStatus::Pending)),
        )
        .set((
            routes::assigned_to.eq(user_id),
            routes::started_at.eq(Utc::now()),
            routes::status.eq(RouteStatus::Initiated),
        ))
        .get_result(conn)
        .optional()
        .map_err(ApiError::from)
    }

    /// Same guarded-update shape as `claim_pending`, for the INITIATED →
    /// COMPLETED edge.
    pub fn complete_initiated(
        conn: &mut PgConnection,
        route_id: Uuid,
    ) -> Result<Option<Route>, ApiError> {
        diesel::update(
            routes::table
                .filter(routes::id.eq(route_id))
                .filter(routes::status.eq(RouteStatus::Initiated)),
        )
        .set((
            routes::status.eq(RouteStatus::Completed),
            routes::completed_at.eq(Utc::now()),
        ))
        .get_result(conn)
        .optional()
        .map_err(ApiError::from)
    }

    /// Unconditional completion, used when a correct PIN closes out the
    /// delivery and its route together.
    pub fn mark_completed(conn: &mut PgConnection, route_id: Uuid) -> Result<Route, ApiError> {
        diesel::update(routes::table.find(route_id))
            .set((
                routes::status.eq(RouteStatus::Completed),
                routes::completed_at.eq(Utc::now()),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn cancel(conn: &mut PgConnection, route_id: Uuid) -> Result<Route, ApiError> {
        diesel::update(routes::table.find(route_id))
            .set((
                routes::status.eq(RouteStatus::Cancelled),
                routes::completed_at.eq(Utc::now()),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// One active trip per courier.
    pub fn has_initiated_route(conn: &mut PgConnection, user_id: Uuid) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            routes::table
                .filter(routes::assigned_to.eq(user_id))
                .filter(routes::status.eq(RouteStatus::Initiated)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    pub fn list_all(
        conn: &mut PgConnection,
    ) -> Result<Vec<(Route, Option<String>)>, ApiError> {
        routes::table
            .left_join(users::table)
            .select((Route::as_select(), users::email.nullable()))
            .order(routes::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn list_by_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        status: Option<RouteStatus>,
    ) -> Result<Vec<Route>, ApiError> {
        let mut query = routes::table
            .filter(routes::assigned_to.eq(user_id))
            .select(Route::as_select())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(routes::status.eq(status));
        }

        query
            .order(routes::created_at.desc())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn list_available(conn: &mut PgConnection) -> Result<Vec<Route>, ApiError> {
        routes::table
            .filter(routes::assigned_to.is_null())
            .filter(routes::status.eq(RouteStatus::Pending))
            .select(Route::as_select())
            .order(routes::created_at.asc())
            .load(conn)
            .map_err(ApiError::from)
    }
}
