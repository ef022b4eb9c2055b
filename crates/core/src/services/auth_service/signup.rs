use crate::app_state::AppState;
use crate::repositories::UserRepository;
use crate::services::auth_service::verification::VerificationService;
use crate::services::token_service::TokenService;
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, Params};
use entrega_primitives::error::ApiError;
use entrega_primitives::models::dtos::auth_dto::SignupRequest;
use entrega_primitives::models::entities::user::NewUser;
use entrega_primitives::models::enum_types::TokenPurpose;
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};

pub struct SignupService;

impl SignupService {
    /// Creates the account unverified and kicks off email verification.
    /// The three steps degrade independently: a duplicate email rejects,
    /// a token-issuance failure leaves a usable account that must resend,
    /// and an email failure still reports the account as created.
    pub async fn signup(state: &AppState, payload: SignupRequest) -> Result<String, ApiError> {
        let mut conn = state.db.get().map_err(|_| {
            error!("auth.signup: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        if UserRepository::exists_by_email(&mut conn, &payload.email)? {
            warn!(email = %payload.email, "signup attempt with already registered email");
            return Err(ApiError::conflict(
                "ALREADY_EXISTING_EMAIL",
                "Email is already registered",
            ));
        }

        let password = SecretString::new(payload.password.into());
        let password_hash = Self::hash_password(&password)?;

        let user = UserRepository::create(
            &mut conn,
            NewUser {
                email: &payload.email,
                password_hash: &password_hash,
                first_name: &payload.first_name,
                last_name: &payload.last_name,
                email_verified: false,
            },
        )?;

        info!(user_id = %user.id, email = %user.email, "new user registered");

        // The account exists from here on; degraded follow-up steps report
        // success with a warning rather than undoing the registration.
        let code = match TokenService::issue(&mut conn, user.id, TokenPurpose::EmailVerification) {
            Ok(code) => code,
            Err(e) => {
                error!("auth.signup: verification token issuance failed: {}", e);
                return Ok(format!(
                    "User registered successfully, but a verification code could not be \
                     issued for {}. Request one via resend-verification.",
                    user.email
                ));
            }
        };

        match VerificationService::send_verification_email(state, &user.email, &code).await {
            Ok(()) => Ok(format!(
                "User registered successfully. A verification code was sent to {}",
                user.email
            )),
            Err(e) => {
                error!(email = %user.email, "auth.signup: verification email failed: {}", e);
                Ok(format!(
                    "User registered successfully, but the verification email to {} could not \
                     be sent. Request a new code via resend-verification.",
                    user.email
                ))
            }
        }
    }

    pub fn hash_password(password: &SecretString) -> Result<String, ApiError> {
        let argon2 = Self::create_argon2()?;
        let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);

        argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|_| {
                error!("auth.signup: password hashing failed");
                ApiError::Internal("Credential processing failed".into())
            })
    }

    pub fn create_argon2() -> Result<Argon2<'static>, ApiError> {
        let params = Params::new(
            65536, // 64 MiB memory
            3,     // iterations
            1,     // parallelism
            None,
        )
        .map_err(|e| {
            error!("Argon2 params error: {}", e);
            ApiError::Internal("Encryption configuration error".to_string())
        })?;
        Ok(Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            params,
        ))
    }
}
