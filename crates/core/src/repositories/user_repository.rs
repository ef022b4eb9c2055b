use chrono::Utc;
use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::user::{NewUser, User};
use entrega_primitives::schema::users;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_by_email(
        conn: &mut PgConnection,
        user_email: &str,
    ) -> Result<Option<User>, ApiError> {
        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn exists_by_email(conn: &mut PgConnection, user_email: &str) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(user_email)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    pub fn create(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .get_result::<User>(conn)
            .map_err(|e| {
                if matches!(
                    e,
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _
                    )
                ) {
                    ApiError::conflict("ALREADY_EXISTING_EMAIL", "Email is already registered")
                } else {
                    ApiError::Database(e)
                }
            })
    }

    /// One-way flip: verification never reverts.
    pub fn mark_email_verified(conn: &mut PgConnection, user_id: Uuid) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set((
                users::email_verified.eq(true),
                users::updated_at.eq(Utc::now()),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn update_password(
        conn: &mut PgConnection,
        user_id: Uuid,
        password_hash: &str,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(Utc::now()),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }
}
