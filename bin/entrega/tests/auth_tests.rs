mod common;

use common::fixtures;
use entrega_primitives::models::enum_types::TokenPurpose;
use http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn signup_creates_unverified_account_with_one_verification_token() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("signup");

    let response = server
        .post("/api/v1/auth/signup")
        .json(&json!({
            "email": email,
            "password": "Passw0rd",
            "first_name": "Ana",
            "last_name": "Blanco",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["statusCode"], 201);

    let user = fixtures::find_user(&state, &email).expect("account persisted");
    assert!(!user.email_verified);

    let tokens = fixtures::tokens_for(&state, user.id, TokenPurpose::EmailVerification);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].attempt_count, 0);
}

#[tokio::test]
#[serial]
async fn signup_with_taken_email_conflicts() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("dup");
    let payload = json!({
        "email": email,
        "password": "Passw0rd",
        "first_name": "Ana",
        "last_name": "Blanco",
    });

    server
        .post("/api/v1/auth/signup")
        .json(&payload)
        .await
        .assert_status(StatusCode::CREATED);

    server
        .post("/api/v1/auth/signup")
        .json(&payload)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn login_unknown_email_is_not_found() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state);

    server
        .post("/api/v1/auth/login")
        .json(&json!({
            "email": fixtures::unique_email("ghost"),
            "password": "Passw0rd",
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn login_with_wrong_password_is_unauthorized() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("wrongpw");
    fixtures::verified_user(&state, &email, "Passw0rd");

    server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "Passw1rd" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn login_requires_verified_email_even_with_correct_credentials() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("unverified");
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

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "Passw0rd" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Email is not verified");
}

#[tokio::test]
#[serial]
async fn login_returns_a_session_token_that_opens_protected_routes() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("login");
    fixtures::verified_user(&state, &email, "Passw0rd");

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({ "email": email, "password": "Passw0rd" }))
        .await;
    response.assert_status(StatusCode::OK);

    let body: serde_json::Value = response.json();
    let token = body["data"]["token"].as_str().expect("session token");
    assert!(body["data"]["expires_in"].as_i64().unwrap() > 0);

    let me = server
        .get("/api/v1/users/me")
        .add_header(http::header::AUTHORIZATION, format!("Bearer {}", token))
        .await;
    me.assert_status(StatusCode::OK);

    let me_body: serde_json::Value = me.json();
    assert_eq!(me_body["data"]["email"], email);
    assert_eq!(me_body["data"]["email_verified"], true);
}

#[tokio::test]
#[serial]
async fn protected_routes_reject_missing_and_garbage_tokens() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state);

    server
        .get("/api/v1/routes")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/v1/routes")
        .add_header(http::header::AUTHORIZATION, "Bearer not.a.token")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[serial]
async fn devices_link_is_idempotent_and_unlink_removes() {
    let Some(state) = common::create_test_app_state() else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return;
    };
    let server = common::create_test_server(state.clone());

    let email = fixtures::unique_email("device");
    let user = fixtures::verified_user(&state, &email, "Passw0rd");
    let token = fixtures::bearer_token(&state, &user);

    let device = json!({ "device_token": format!("ExponentPushToken[{}]", user.id) });

    for _ in 0..2 {
        server
            .post("/api/v1/devices/link")
            .add_header(http::header::AUTHORIZATION, format!("Bearer {}", token))
            .json(&device)
            .await
            .assert_status(StatusCode::OK);
    }

    {
        use diesel::prelude::*;
        use entrega_primitives::schema::devices;
        let mut conn = state.db.get().unwrap();
        let count: i64 = devices::table
            .filter(devices::user_id.eq(user.id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count, 1);
    }

    server
        .post("/api/v1/devices/unlink")
        .add_header(http::header::AUTHORIZATION, format!("Bearer {}", token))
        .json(&device)
        .await
        .assert_status(StatusCode::OK);

    {
        use diesel::prelude::*;
        use entrega_primitives::schema::devices;
        let mut conn = state.db.get().unwrap();
        let count: i64 = devices::table
            .filter(devices::user_id.eq(user.id))
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(count, 0);
    }
}
