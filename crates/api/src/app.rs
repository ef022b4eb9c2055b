use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    assign_route::assign_route, available_routes::available_routes,
    cancel_delivery::cancel_delivery, complete_route::complete_route,
    confirm_delivery::confirm_delivery, create_delivery::create_delivery,
    current_user::current_user, devices::link_device, devices::unlink_device,
    get_delivery::get_delivery, health::health_check, login::login,
    my_deliveries::my_deliveries, password_reset::forgot_password,
    password_reset::reset_password, routes::create_route, routes::list_routes,
    signup::signup, user_routes::user_routes, verify_email::resend_verification,
    verify_email::verify_email, warehouse_packages::warehouse_packages,
};
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use axum_prometheus::metrics_exporter_prometheus::PrometheusHandle;
use axum_prometheus::PrometheusMetricLayer;
use entrega_core::app_state::AppState;
use entrega_core::security::SecurityConfig;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    // rate limiting configuration
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .finish()
            .unwrap(),
    );

    let public_router = create_public_routes();

    let protected_router = create_protected_routes(&state);

    let mut router = Router::new()
        .merge(public_router)
        .merge(protected_router)
        .route("/metrics", get(move || async move { metric_handle.render() }))
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        )
        .layer(metric_layer);

    // rate limiting keys on the peer address, which the test server does
    // not provide
    if std::env::var("APP_ENV").unwrap_or_default() != "test" {
        router = router.layer(GovernorLayer::new(governor_conf));
    }

    router.with_state(state)
}

fn create_public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/verify", post(verify_email))
        .route(
            "/api/v1/auth/resend-verification",
            post(resend_verification),
        )
        .route("/api/v1/auth/forgot-password", post(forgot_password))
        .route("/api/v1/auth/reset-password", post(reset_password))
        .route("/api/v1/health", get(health_check))
}

fn create_protected_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/v1/delivery", post(create_delivery))
        .route("/api/v1/delivery/warehouse", get(warehouse_packages))
        .route("/api/v1/delivery/mine", get(my_deliveries))
        .route("/api/v1/delivery/{id}", get(get_delivery))
        .route("/api/v1/delivery/{id}/confirm", put(confirm_delivery))
        .route("/api/v1/delivery/{id}/cancel", put(cancel_delivery))
        .route("/api/v1/routes", get(list_routes).post(create_route))
        .route("/api/v1/routes/available", get(available_routes))
        .route("/api/v1/routes/user/{id}", get(user_routes))
        .route("/api/v1/routes/{id}/assign", put(assign_route))
        .route("/api/v1/routes/{id}/complete", put(complete_route))
        .route("/api/v1/devices/link", post(link_device))
        .route("/api/v1/devices/unlink", post(unlink_device))
        .route("/api/v1/users/me", get(current_user))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            SecurityConfig::auth_middleware,
        ))
}
