mod common;

use chrono::{Duration, Utc};
use common::fixtures;
use entrega_core::services::TokenService;
use entrega_primitives::models::enum_types::TokenPurpose;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

const RESET_REQUESTED: &str =
    "If an account exists for that email, a password reset code has been sent.";

#[tokio::test]
#[serial]
async fn forgot_password_response_is_uniform_for_unknown_emails() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let unknown = server
        .post("/api/v1/auth/forgot-password")
        .json(&json!({ "email": fixtures::unique_email("nobody") }))
        .await;
    unknown.assert_status(StatusCode::OK);
    let unknown_body: serde_json::Value = unknown.json();

    let email = fixtures::unique_email("somebody");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    let known = server
        .post("/api/v1/auth/forgot-password")
        .json(&json!({ "email": email }))
        .await;
    known.assert_status(StatusCode::OK);
    let known_body: serde_json::Value = known.json();

    // identical envelope either way; only the store knows the difference
    assert_eq!(unknown_body["message"], RESET_REQUESTED);
    assert_eq!(known_body["message"], RESET_REQUESTED);

    assert_eq!(
        fixtures::tokens_for(&state, user.id, TokenPurpose::PasswordReset).len(),
        1
    );
}

#[tokio::test]
#[serial]
async fn reset_password_happy_path_rotates_the_credential() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("reset");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    let code = {
        let mut conn = state.db.get().unwrap();
        TokenService::issue(&mut conn, user.id, TokenPurpose::PasswordReset).unwrap()
    };

    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": code, "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::OK);

    // token consumed
    assert!(fixtures::tokens_for(&state, user.id, TokenPurpose::PasswordReset).is_empty());

    // old password dead, new one live
    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "Passw0rd" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn reset_with_wrong_code_is_unauthorized() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("badcode");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::PasswordReset,
        "4711",
        fixtures::active_expiry(),
    );

    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": "0000", "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn policy_rejection_still_consumes_an_attempt() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("policy");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::PasswordReset,
        "4711",
        fixtures::active_expiry(),
    );

    // correct code, non-compliant password
    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": "4711", "password": "nope" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tokens = fixtures::tokens_for(&state, user.id, TokenPurpose::PasswordReset);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].attempt_count, 1);

    // still two attempts left; a compliant retry succeeds
    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": "4711", "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn third_policy_rejection_burns_the_token() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("burn");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::PasswordReset,
        "4711",
        fixtures::active_expiry(),
    );

    for _ in 0..3 {
        server
            .post("/api/v1/auth/reset-password")
            .json(&json!({ "email": email, "token": "4711", "password": "nope" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    // burned outright rather than left to linger
    assert!(fixtures::tokens_for(&state, user.id, TokenPurpose::PasswordReset).is_empty());

    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": "4711", "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn expired_reset_code_is_rejected_even_with_attempts_left() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("expiredreset");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::PasswordReset,
        "4711",
        Utc::now() - Duration::seconds(1),
    );

    server
        .post("/api/v1/auth/reset-password")
        .json(&json!({ "email": email, "token": "4711", "password": "NewPass1" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
