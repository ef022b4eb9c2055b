use crate::models::enum_types::TokenPurpose;
use crate::schema::credential_tokens;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use uuid::Uuid;

/// One outstanding secret. The value at rest is a SHA-256 hash; the
/// plaintext code only ever travels in the email to its owner.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(belongs_to(crate::models::entities::user::User))]
#[diesel(table_name = credential_tokens)]
pub struct CredentialToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub purpose: TokenPurpose,
    pub expires_at: DateTime<Utc>,
    pub attempt_count: i32,
    pub created_at: DateTime<Utc>,
}

impl CredentialToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_locked_out(&self) -> bool {
        self.attempt_count >= self.purpose.max_attempts()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = credential_tokens)]
pub struct NewCredentialToken<'a> {
    pub user_id: Uuid,
    pub token_hash: &'a str,
    pub purpose: TokenPurpose,
    pub expires_at: DateTime<Utc>,
}
