use chrono::Duration;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::RouteStatus"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteStatus {
    Pending,
    Initiated,
    Completed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::DeliveryStatus"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    NotDelivered,
    Delivered,
    RejectedByUser,
    RejectedByDelivery,
}

/// What a credential token proves. Each purpose carries its own expiry and
/// attempt budget: password reset is higher-value, so it lives shorter and
/// tolerates fewer guesses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::TokenPurpose"]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

impl TokenPurpose {
    pub fn ttl(&self) -> Duration {
        match self {
            TokenPurpose::EmailVerification => Duration::hours(24),
            TokenPurpose::PasswordReset => Duration::minutes(5),
        }
    }

    pub fn max_attempts(&self) -> i32 {
        match self {
            TokenPurpose::EmailVerification => 5,
            TokenPurpose::PasswordReset => 3,
        }
    }
}
