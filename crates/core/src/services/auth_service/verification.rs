use crate::app_state::AppState;
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token_service::TokenService;
use diesel::Connection;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::enum_types::TokenPurpose;
use tracing::{error, info};

pub struct VerificationService;

impl VerificationService {
    pub async fn verify_email(
        state: &AppState,
        token: &str,
        email: &str,
    ) -> Result<&'static str, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let token_row =
            TokenService::validate(&mut conn, token, TokenPurpose::EmailVerification, email)?;

        // The join in validate() guarantees the owner existed; a vanished
        // account still gets the indistinct rejection.
        let user = UserRepository::find_by_id(&mut conn, token_row.user_id)?
            .ok_or_else(|| TokenService::rejection(TokenPurpose::EmailVerification))?;

        if user.email_verified {
            TokenRepository::delete(&mut conn, token_row.id)?;
            return Ok("Email is already verified");
        }

        conn.transaction::<_, ApiError, _>(|conn| {
            UserRepository::mark_email_verified(conn, user.id)?;
            TokenRepository::delete(conn, token_row.id)
        })?;

        info!(user_id = %user.id, "email verified");
        Ok("Email verified successfully")
    }

    pub async fn resend_verification(state: &AppState, email: &str) -> Result<String, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let user = UserRepository::find_by_email(&mut conn, email)?.ok_or_else(|| {
            ApiError::not_found("NOT_EXISTING_USER", "No account exists for that email")
        })?;

        // Nothing to leak: whether a token currently exists stays private.
        if user.email_verified {
            return Ok("Email is already verified".into());
        }

        let code = TokenService::issue(&mut conn, user.id, TokenPurpose::EmailVerification)?;

        match Self::send_verification_email(state, &user.email, &code).await {
            Ok(()) => Ok(format!("A verification code was sent to {}", user.email)),
            Err(e) => {
                error!(email = %user.email, "resend verification email failed: {}", e);
                Ok(format!(
                    "A new verification code was issued, but the email to {} could not be sent. \
                     Please retry.",
                    user.email
                ))
            }
        }
    }

    pub async fn send_verification_email(
        state: &AppState,
        email: &str,
        code: &str,
    ) -> Result<(), ApiError> {
        let subject = "Verify your email - Entrega";
        let body = format!(
            r#"
            <div style="font-family: sans-serif; max-width: 600px; margin: auto; padding: 20px; border: 1px solid #eee; border-radius: 10px;">
                <h2 style="color: #333;">Welcome to Entrega!</h2>
                <p>Use this code to verify your email address:</p>
                <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold; text-align: center;">{}</p>
                <hr style="border: 0; border-top: 1px solid #eee; margin: 30px 0;">
                <p style="color: #999; font-size: 12px;">This code expires in 24 hours.</p>
            </div>
            "#,
            code
        );

        state.email.send_email(email, subject, &body).await
    }
}
