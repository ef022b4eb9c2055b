use crate::repositories::TokenRepository;
use crate::secrets;
use chrono::Utc;
use diesel::prelude::*;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::credential_token::{CredentialToken, NewCredentialToken};
use entrega_primitives::models::enum_types::TokenPurpose;
use http::StatusCode;
use tracing::info;
use uuid::Uuid;

/// Issues and validates the short numeric codes behind email verification
/// and password reset. Enforces expiry, the per-purpose attempt budget and
/// the single-active-token invariant; one-time consumption is the caller's
/// side of the contract.
pub struct TokenService;

impl TokenService {
    /// Supersede-then-insert runs in one transaction, so concurrent
    /// issuance for the same (user, purpose) cannot leave two live codes.
    /// Returns the plaintext code for transport; only the hash is stored.
    pub fn issue(
        conn: &mut PgConnection,
        user_id: Uuid,
        purpose: TokenPurpose,
    ) -> Result<String, ApiError> {
        let code = secrets::generate_code();
        let token_hash = secrets::hash_secret(&code);
        let expires_at = Utc::now() + purpose.ttl();

        conn.transaction::<_, ApiError, _>(|conn| {
            let superseded = TokenRepository::delete_for_user(conn, user_id, purpose)?;
            if superseded > 0 {
                info!(
                    %user_id,
                    %purpose,
                    superseded,
                    "invalidated previous credential token(s)"
                );
            }

            TokenRepository::create(
                conn,
                NewCredentialToken {
                    user_id,
                    token_hash: &token_hash,
                    purpose,
                    expires_at,
                },
            )?;
            Ok(())
        })?;

        Ok(code)
    }

    /// Every attempt against the account's outstanding token costs a try,
    /// wrong guesses included, and the count is persisted before control
    /// returns so downstream rejections (password policy and the like)
    /// still burn it. Wrong value, unknown email, expired and locked-out
    /// all surface as the same rejection.
    pub fn validate(
        conn: &mut PgConnection,
        value: &str,
        purpose: TokenPurpose,
        owner_email: &str,
    ) -> Result<CredentialToken, ApiError> {
        let token = TokenRepository::find_active_for(conn, purpose, owner_email)?
            .ok_or_else(|| Self::rejection(purpose))?;

        if token.is_locked_out() {
            return Err(Self::rejection(purpose));
        }

        let token = TokenRepository::record_attempt(conn, token.id)?;

        if token.token_hash != secrets::hash_secret(value) {
            return Err(Self::rejection(purpose));
        }

        Ok(token)
    }

    pub fn rejection(purpose: TokenPurpose) -> ApiError {
        match purpose {
            TokenPurpose::EmailVerification => ApiError::invalid_secret(
                "INVALID_TOKEN",
                "Invalid or expired verification code",
                StatusCode::BAD_REQUEST,
            ),
            TokenPurpose::PasswordReset => ApiError::invalid_secret(
                "TOKEN_INVALID_OR_EXPIRED",
                "Invalid or expired password reset code",
                StatusCode::UNAUTHORIZED,
            ),
        }
    }
}
