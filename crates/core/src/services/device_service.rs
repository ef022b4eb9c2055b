use crate::repositories::DeviceRepository;
use diesel::PgConnection;
use entrega_primitives::error::ApiError;
use tracing::info;
use uuid::Uuid;

pub struct DeviceService;

impl DeviceService {
    pub fn link_device(
        conn: &mut PgConnection,
        user_id: Uuid,
        device_token: &str,
    ) -> Result<&'static str, ApiError> {
        DeviceRepository::link(conn, user_id, device_token)?;
        info!(%user_id, "device linked");
        Ok("Device linked successfully")
    }

    pub fn unlink_device(
        conn: &mut PgConnection,
        user_id: Uuid,
        device_token: &str,
    ) -> Result<&'static str, ApiError> {
        DeviceRepository::unlink(conn, user_id, device_token)?;
        info!(%user_id, "device unlinked");
        Ok("Device unlinked successfully")
    }
}
