#![allow(dead_code)]

use axum_test::TestServer;
use axum_prometheus::metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use axum_prometheus::PrometheusMetricLayer;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use entrega_core::app_state::AppState;
use entrega_core::notifications::NotificationDispatcher;
use entrega_primitives::models::app_config::{AppConfig, JwtInfo, PushInfo, SmtpInfo};
use secrecy::SecretString;
use std::sync::{Arc, OnceLock};

pub mod fixtures;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../../migrations");

/// Integration tests need a live Postgres. Without TEST_DATABASE_URL they
/// skip instead of failing, so the unit suite stays runnable anywhere.
pub fn create_test_app_state() -> Option<Arc<AppState>> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;

    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        std::env::set_var("APP_ENV", "test");
    });

    let manager = ConnectionManager::<PgConnection>::new(&database_url);
    let pool = Pool::builder().max_size(5).build(manager).ok()?;

    {
        let mut conn = pool.get().expect("test database connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("test migrations");
    }

    let config = AppConfig {
        jwt: JwtInfo {
            jwt_secret: SecretString::from(
                "test_secret_key_minimum_32_characters_long_for_testing",
            ),
            jwt_expiration_hours: 2,
            jwt_issuer: "entrega".to_string(),
            jwt_audience: "entrega_api".to_string(),
        },
        app_url: "http://localhost:8080".to_string(),
        smtp: SmtpInfo {
            // log-only email client
            smtp_host: None,
            smtp_username: String::new(),
            smtp_password: SecretString::from(""),
            smtp_from: "Entrega <no-reply@entrega.app>".to_string(),
        },
        push: PushInfo {
            // unreachable on purpose; fan-out failures are values, never
            // request errors
            expo_api_url: "http://127.0.0.1:9/push".to_string(),
        },
        notification_queue_depth: 16,
    };

    // The receiver is dropped: dispatch becomes a logged no-op, which is
    // exactly the "fan-out never affects the primary request" contract.
    let (notifier, _events) = NotificationDispatcher::bounded(16);

    AppState::new(pool, config, notifier).ok()
}

/// The Prometheus recorder is process-global, so the handle is created
/// once and each server gets a fresh layer.
fn metric_pair() -> (PrometheusMetricLayer<'static>, PrometheusHandle) {
    static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
    let handle = HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .expect("prometheus recorder")
        })
        .clone();
    (PrometheusMetricLayer::new(), handle)
}

pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let (metric_layer, metric_handle) = metric_pair();
    let app = entrega_api::app::create_router(state, metric_layer, metric_handle);
    TestServer::new(app).expect("test server")
}
