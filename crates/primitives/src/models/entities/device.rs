use crate::schema::devices;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// A push endpoint registered against an account. Unique per
/// (user, device_token); removed when the push provider reports the token
/// as permanently invalid or when the owner unlinks it.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(belongs_to(crate::models::entities::user::User))]
#[diesel(table_name = devices)]
pub struct Device {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device_token: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = devices)]
pub struct NewDevice<'a> {
    pub user_id: Uuid,
    pub device_token: &'a str,
}
