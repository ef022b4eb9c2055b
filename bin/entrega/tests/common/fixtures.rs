use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use entrega_core::app_state::AppState;
use entrega_core::secrets;
use entrega_core::security::SecurityConfig;
use entrega_core::services::auth_service::SignupService;
use entrega_primitives::models::entities::credential_token::CredentialToken;
use entrega_primitives::models::entities::product::NewProduct;
use entrega_primitives::models::entities::user::{NewUser, User};
use entrega_primitives::models::enum_types::TokenPurpose;
use entrega_primitives::schema::{credential_tokens, products, users};
use secrecy::SecretString;
use serde_json::json;
use uuid::Uuid;

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4().simple())
}

/// Inserts a verified account directly, bypassing the signup flow.
pub fn verified_user(state: &AppState, email: &str, password: &str) -> User {
    let mut conn = state.db.get().unwrap();

    let password_hash =
        SignupService::hash_password(&SecretString::from(password.to_string())).unwrap();

    diesel::insert_into(users::table)
        .values(&NewUser {
            email,
            password_hash: &password_hash,
            first_name: "Test",
            last_name: "Courier",
            email_verified: true,
        })
        .get_result(&mut conn)
        .unwrap()
}

pub fn bearer_token(state: &AppState, user: &User) -> String {
    SecurityConfig::create_token(&state.config.jwt, &user.id.to_string()).unwrap()
}

pub fn find_user(state: &AppState, email: &str) -> Option<User> {
    let mut conn = state.db.get().unwrap();
    users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(&mut conn)
        .optional()
        .unwrap()
}

pub fn tokens_for(state: &AppState, user_id: Uuid, purpose: TokenPurpose) -> Vec<CredentialToken> {
    let mut conn = state.db.get().unwrap();
    credential_tokens::table
        .filter(credential_tokens::user_id.eq(user_id))
        .filter(credential_tokens::purpose.eq(purpose))
        .select(CredentialToken::as_select())
        .load(&mut conn)
        .unwrap()
}

/// Replaces the user's outstanding token with one whose plaintext is known
/// to the test.
pub fn set_known_token(
    state: &AppState,
    user_id: Uuid,
    purpose: TokenPurpose,
    value: &str,
    expires_at: DateTime<Utc>,
) {
    let mut conn = state.db.get().unwrap();

    diesel::delete(
        credential_tokens::table
            .filter(credential_tokens::user_id.eq(user_id))
            .filter(credential_tokens::purpose.eq(purpose)),
    )
    .execute(&mut conn)
    .unwrap();

    diesel::insert_into(credential_tokens::table)
        .values((
            credential_tokens::user_id.eq(user_id),
            credential_tokens::token_hash.eq(secrets::hash_secret(value)),
            credential_tokens::purpose.eq(purpose),
            credential_tokens::expires_at.eq(expires_at),
        ))
        .execute(&mut conn)
        .unwrap();
}

pub fn active_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::hours(1)
}

pub fn create_products(state: &AppState, count: usize) -> Vec<Uuid> {
    let mut conn = state.db.get().unwrap();

    (0..count)
        .map(|i| {
            let name = format!("Test product {}", i);
            diesel::insert_into(products::table)
                .values(&NewProduct {
                    name: &name,
                    description: None,
                })
                .returning(products::id)
                .get_result(&mut conn)
                .unwrap()
        })
        .collect()
}

/// Creates a delivery through the API and returns the response data object
/// (id, pin, qr_code, route, ...).
pub async fn create_delivery(
    server: &TestServer,
    token: &str,
    package_location: &str,
    product_ids: &[Uuid],
) -> serde_json::Value {
    let response = server
        .post("/api/v1/delivery")
        .add_header(
            http::header::AUTHORIZATION,
            format!("Bearer {}", token),
        )
        .json(&json!({
            "package_location": package_location,
            "product_ids": product_ids,
        }))
        .await;

    response.assert_status(http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["data"].clone()
}
