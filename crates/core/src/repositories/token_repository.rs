use chrono::Utc;
use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::credential_token::{CredentialToken, NewCredentialToken};
use entrega_primitives::models::enum_types::TokenPurpose;
use entrega_primitives::schema::{credential_tokens, users};
use uuid::Uuid;

pub struct TokenRepository;

impl TokenRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_token: NewCredentialToken,
    ) -> Result<CredentialToken, ApiError> {
        diesel::insert_into(credential_tokens::table)
            .values(&new_token)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// The outstanding unexpired token for (owner, purpose), if any. Every
    /// validation attempt resolves through this lookup so that wrong
    /// guesses charge the token's attempt budget too.
    pub fn find_active_for(
        conn: &mut PgConnection,
        purpose: TokenPurpose,
        owner_email: &str,
    ) -> Result<Option<CredentialToken>, ApiError> {
        credential_tokens::table
            .inner_join(users::table)
            .filter(users::email.eq(owner_email))
            .filter(credential_tokens::purpose.eq(purpose))
            .filter(credential_tokens::expires_at.gt(Utc::now()))
            .order(credential_tokens::created_at.desc())
            .select(CredentialToken::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Supersession: a new issuance wipes every prior token of the same
    /// purpose for the owner, expired rows included.
    pub fn delete_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<usize, ApiError> {
        diesel::delete(
            credential_tokens::table
                .filter(credential_tokens::user_id.eq(user_id))
                .filter(credential_tokens::purpose.eq(purpose)),
        )
        .execute(conn)
        .map_err(ApiError::from)
    }

    /// Persists the attempt before the caller regains control, so a crash
    /// mid-flow still counts it.
    pub fn record_attempt(
        conn: &mut PgConnection,
        token_id: Uuid,
    ) -> Result<CredentialToken, ApiError> {
        diesel::update(credential_tokens::table.find(token_id))
            .set(credential_tokens::attempt_count.eq(credential_tokens::attempt_count + 1))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn delete(conn: &mut PgConnection, token_id: Uuid) -> Result<(), ApiError> {
        diesel::delete(credential_tokens::table.find(token_id))
            .execute(conn)
            .map(|_| ())
            .map_err(ApiError::from)
    }

    pub fn delete_expired(conn: &mut PgConnection) -> Result<usize, ApiError> {
        diesel::delete(credential_tokens::table.filter(credential_tokens::expires_at.lt(Utc::now())))
            .execute(conn)
            .map_err(ApiError::from)
    }
}
