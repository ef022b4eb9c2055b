use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LinkDeviceRequest {
    #[validate(length(min = 1, message = "must not be blank"))]
    pub device_token: String,
}
