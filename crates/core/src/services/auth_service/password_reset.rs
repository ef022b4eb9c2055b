use crate::app_state::AppState;
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::auth_service::signup::SignupService;
use crate::services::token_service::TokenService;
use diesel::Connection;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::ResetPasswordRequest;
use entrega_primitives::models::enum_types::TokenPurpose;
use secrecy::SecretString;
use tracing::{error, info, warn};

/// Response for forgot-password regardless of whether the account exists;
/// a distinct not-found here would hand attackers an account oracle.
const RESET_REQUESTED: &str =
    "If an account exists for that email, a password reset code has been sent.";

pub struct PasswordResetService;

impl PasswordResetService {
    pub async fn forgot_password(state: &AppState, email: &str) -> Result<&'static str, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let Some(user) = UserRepository::find_by_email(&mut conn, email)? else {
            warn!(email, "password reset requested for unknown email");
            return Ok(RESET_REQUESTED);
        };

        let code = TokenService::issue(&mut conn, user.id, TokenPurpose::PasswordReset)?;
        info!(user_id = %user.id, "password reset token issued");

        if let Err(e) = Self::send_reset_email(state, &user.email, &code).await {
            // The response stays uniform; the miss is only visible in logs
            // and the user can re-request a code.
            error!(email = %user.email, "password reset email failed: {}", e);
        }

        Ok(RESET_REQUESTED)
    }

    pub async fn reset_password(
        state: &AppState,
        payload: ResetPasswordRequest,
    ) -> Result<&'static str, ApiError> {
        let mut conn = state
            .db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))?;

        let token = TokenService::validate(
            &mut conn,
            &payload.token,
            TokenPurpose::PasswordReset,
            &payload.email,
        )?;

        // The attempt is already persisted; a policy rejection costs the
        // caller a try, and the last try burns the token outright.
        if !is_valid_password(&payload.password) {
            if token.is_locked_out() {
                TokenRepository::delete(&mut conn, token.id)?;
                warn!(user_id = %token.user_id, "reset token burned after max attempts");
            }
            return Err(ApiError::invalid_state(
                "PASSWORD_REQUIREMENTS",
                "Password must be at least 6 characters long and contain an uppercase letter \
                 and a digit",
            ));
        }

        let password = SecretString::new(payload.password.into());
        let password_hash = SignupService::hash_password(&password)?;

        conn.transaction::<_, ApiError, _>(|conn| {
            UserRepository::update_password(conn, token.user_id, &password_hash)?;
            TokenRepository::delete(conn, token.id)
        })?;

        info!(user_id = %token.user_id, "password reset successfully");

        if let Err(e) = Self::send_changed_email(state, &payload.email).await {
            // Secondary failure; the password was reset.
            error!(email = %payload.email, "password-changed email failed: {}", e);
        }

        Ok("Password has been reset successfully")
    }

    async fn send_reset_email(state: &AppState, email: &str, code: &str) -> Result<(), ApiError> {
        let subject = "Password reset code - Entrega";
        let body = format!(
            r#"
            <div style="font-family: sans-serif; max-width: 600px; margin: auto; padding: 20px; border: 1px solid #eee; border-radius: 10px;">
                <h2 style="color: #333;">Password reset requested</h2>
                <p>Use this code to reset your password:</p>
                <p style="font-size: 32px; letter-spacing: 8px; font-weight: bold; text-align: center;">{}</p>
                <hr style="border: 0; border-top: 1px solid #eee; margin: 30px 0;">
                <p style="color: #999; font-size: 12px;">This code expires in 5 minutes. If you did not request it, you can ignore this email.</p>
            </div>
            "#,
            code
        );

        state.email.send_email(email, subject, &body).await
    }

    async fn send_changed_email(state: &AppState, email: &str) -> Result<(), ApiError> {
        let subject = "Your password was changed - Entrega";
        let body = r#"
            <div style="font-family: sans-serif; max-width: 600px; margin: auto; padding: 20px; border: 1px solid #eee; border-radius: 10px;">
                <h2 style="color: #333;">Password changed</h2>
                <p>Your account password was just changed. If this was not you, request a password reset immediately.</p>
            </div>
            "#;

        state.email.send_email(email, subject, body).await
    }
}

/// At least 6 characters, one uppercase letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= 6
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_compliant_passwords() {
        assert!(is_valid_password("Passw0rd"));
        assert!(is_valid_password("A1bcde"));
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(!is_valid_password("A1bc"));
    }

    #[test]
    fn rejects_missing_uppercase() {
        assert!(!is_valid_password("passw0rd"));
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(!is_valid_password("Password"));
    }
}
