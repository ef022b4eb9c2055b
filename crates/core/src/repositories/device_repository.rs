use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::device::{Device, NewDevice};
use entrega_primitives::schema::devices;
use uuid::Uuid;

pub struct DeviceRepository;

impl DeviceRepository {
    /// Idempotent: re-linking an already linked (user, token) pair is a
    /// no-op.
    pub fn link(
        conn: &mut PgConnection,
        user_id: Uuid,
        device_token: &str,
    ) -> Result<(), ApiError> {
        diesel::insert_into(devices::table)
            .values(&NewDevice {
                user_id,
                device_token,
            })
            .on_conflict((devices::user_id, devices::device_token))
            .do_nothing()
            .execute(conn)
            .map(|_| ())
            .map_err(ApiError::from)
    }

    pub fn unlink(
        conn: &mut PgConnection,
        user_id: Uuid,
        device_token: &str,
    ) -> Result<usize, ApiError> {
        diesel::delete(
            devices::table
                .filter(devices::user_id.eq(user_id))
                .filter(devices::device_token.eq(device_token)),
        )
        .execute(conn)
        .map_err(ApiError::from)
    }

    pub fn find_all(conn: &mut PgConnection) -> Result<Vec<Device>, ApiError> {
        devices::table
            .select(Device::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn find_by_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<Device>, ApiError> {
        devices::table
            .filter(devices::user_id.eq(user_id))
            .select(Device::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    /// Self-healing registry: called when the push provider reports the
    /// token as permanently dead.
    pub fn delete_by_token(conn: &mut PgConnection, device_token: &str) -> Result<usize, ApiError> {
        diesel::delete(devices::table.filter(devices::device_token.eq(device_token)))
            .execute(conn)
            .map_err(ApiError::from)
    }
}
