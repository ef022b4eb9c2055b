mod common;

use chrono::{Duration, Utc};
use common::fixtures;
use entrega_core::services::TokenService;
use entrega_primitives::models::enum_types::TokenPurpose;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn full_email_verification_flow() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("verify");
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await
        .assert_status(StatusCode::CREATED);

    let user = fixtures::find_user(&state, &email).unwrap();
    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::EmailVerification,
        "4711",
        fixtures::active_expiry(),
    );

    server
        .post("/api/v1/auth/verify")
        .json(&json!({ "email": email, "token": "4711" }))
        .await
        .assert_status(StatusCode::OK);

    let user = fixtures::find_user(&state, &email).unwrap();
    assert!(user.email_verified);

    // one-time use: the token is gone
    assert!(fixtures::tokens_for(&state, user.id, TokenPurpose::EmailVerification).is_empty());

    // and the account can now log in
    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "Passw0rd" }))
        .await
        .assert_status(StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn wrong_code_rejects_and_charges_an_attempt() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("wrongcode");
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let unverified = fixtures::find_user(&state, &email).unwrap();

    fixtures::set_known_token(
        &state,
        unverified.id,
        TokenPurpose::EmailVerification,
        "4711",
        fixtures::active_expiry(),
    );

    server
        .post("/api/v1/auth/verify")
        .json(&json!({ "email": email, "token": "0000" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let tokens = fixtures::tokens_for(&state, unverified.id, TokenPurpose::EmailVerification);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].attempt_count, 1);

    let user = fixtures::find_user(&state, &email).unwrap();
    assert!(!user.email_verified);
}

#[tokio::test]
#[serial]
async fn five_wrong_guesses_lock_the_token_out_for_good() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("lockout");
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let user = fixtures::find_user(&state, &email).unwrap();

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::EmailVerification,
        "4711",
        fixtures::active_expiry(),
    );

    for _ in 0..5 {
        server
            .post("/api/v1/auth/verify")
            .json(&json!({ "email": email, "token": "9999" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    // the correct code no longer helps
    server
        .post("/api/v1/auth/verify")
        .json(&json!({ "email": email, "token": "4711" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let user = fixtures::find_user(&state, &email).unwrap();
    assert!(!user.email_verified);
}

#[tokio::test]
#[serial]
async fn expired_code_rejects_regardless_of_attempts() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("expired");
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let user = fixtures::find_user(&state, &email).unwrap();

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::EmailVerification,
        "4711",
        Utc::now() - Duration::minutes(1),
    );

    server
        .post("/api/v1/auth/verify")
        .json(&json!({ "email": email, "token": "4711" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[serial]
async fn issuing_twice_leaves_only_the_second_token_valid() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };

    let email = fixtures::unique_email("supersede");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    let mut conn = state.db.get().unwrap();
    let first = TokenService::issue(&mut conn, user.id, TokenPurpose::PasswordReset).unwrap();
    let second = TokenService::issue(&mut conn, user.id, TokenPurpose::PasswordReset).unwrap();

    assert_eq!(
        fixtures::tokens_for(&state, user.id, TokenPurpose::PasswordReset).len(),
        1
    );

    // Codes can collide (4 digits); the superseded one may only validate
    // when it happens to equal the fresh one.
    if first != second {
        assert!(
            TokenService::validate(&mut conn, &first, TokenPurpose::PasswordReset, &email)
                .is_err()
        );
    }
    assert!(
        TokenService::validate(&mut conn, &second, TokenPurpose::PasswordReset, &email).is_ok()
    );
}

#[tokio::test]
#[serial]
async fn verifying_an_already_verified_account_consumes_the_token_idempotently() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("alreadyverified");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::EmailVerification,
        "4711",
        fixtures::active_expiry(),
    );

    let response = server
        .post("/api/v1/auth/verify")
        .json(&json!({ "email": email, "token": "4711" }))
        .await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Email is already verified");

    assert!(fixtures::tokens_for(&state, user.id, TokenPurpose::EmailVerification).is_empty());
}

#[tokio::test]
#[serial]
async fn resend_verification_handles_unknown_and_verified_accounts() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    server
        .post("/api/v1/auth/resend-verification")
        .json(&json!({ "email": fixtures::unique_email("ghost") }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let email = fixtures::unique_email("resendverified");
    fixtures::verified_user(&state, &email, "Passw0rd");

    let response = server
        .post("/api/v1/auth/resend-verification")
        .json(&json!({ "email": email }))
        .await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Email is already verified");
}

#[tokio::test]
#[serial]
async fn resend_verification_supersedes_the_previous_code() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("resend");
    server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await
        .assert_status(StatusCode::CREATED);
    let user = fixtures::find_user(&state, &email).unwrap();

    fixtures::set_known_token(
        &state,
        user.id,
        TokenPurpose::EmailVerification,
        "4711",
        fixtures::active_expiry(),
    );

    server
        .post("/api/v1/auth/resend-verification")
        .json(&json!({ "email": email }))
        .await
        .assert_status(StatusCode::OK);

    let tokens = fixtures::tokens_for(&state, user.id, TokenPurpose::EmailVerification);
    assert_eq!(tokens.len(), 1);

    // The old code died with the reissue. Fresh codes are random 4-digit
    // values, so only exercise the rejection when they actually differ.
    if tokens[0].token_hash != entrega_core::secrets::hash_secret("4711") {
        server
            .post("/api/v1/auth/verify")
            .json(&json!({ "email": email, "token": "4711" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
