use crate::app_state::AppState;
use crate::repositories::UserRepository;
use crate::security::SecurityConfig;
use crate::services::auth_service::signup::SignupService;
use argon2::password_hash::PasswordHash;
use argon2::PasswordVerifier;
use entrega_primitives::error::{ApiError, AuthError};
use entrega_primitives::models::dtos::auth_dto::{LoginRequest, LoginResponse};
use entrega_primitives::models::entities::user::User;
use tracing::{error, info, warn};

pub struct LoginService;

impl LoginService {
    /// Credentials are checked before the verification gate: an unverified
    /// account with a correct password still gets no session.
    pub async fn login(state: &AppState, payload: LoginRequest) -> Result<LoginResponse, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("auth.login: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = UserRepository::find_by_email(&mut conn, &payload.email)?.ok_or_else(|| {
            ApiError::not_found("NOT_EXISTING_USER", "No account exists for that email")
        })?;

        Self::verify_password(&payload.password, &user)?;

        if !user.email_verified {
            warn!(user_id = %user.id, "login rejected, email not verified");
            return Err(ApiError::Auth(AuthError::EmailNotVerified));
        }

        let token = SecurityConfig::create_token(&state.config.jwt, &user.id.to_string())
            .map_err(|_| {
                error!("auth.login: jwt creation failed");
                ApiError::Internal("Authentication service unavailable".into())
            })?;

        info!(user_id = %user.id, "user logged in successfully");

        Ok(LoginResponse {
            token,
            expires_in: state.config.jwt.jwt_expiration_hours * 3600,
        })
    }

    fn verify_password(password: &str, user: &User) -> Result<(), ApiError> {
        let parsed = PasswordHash::new(&user.password_hash).map_err(|_| {
            error!("auth.login: stored password hash is invalid");
            ApiError::Internal("Authentication failure".into())
        })?;

        let argon2 = SignupService::create_argon2()?;

        if argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            warn!("auth.login: invalid credentials");
            return Err(ApiError::Auth(AuthError::InvalidCredentials));
        }

        Ok(())
    }
}
