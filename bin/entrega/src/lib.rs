mod observability;

pub mod utility;

pub use entrega_primitives::error::ApiError;

use crate::utility::clean_up_tasks::spawn_background_tasks;
use crate::utility::db_pool::create_db_pool;
use crate::utility::logging::setup_logging;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use entrega_core::app_state::AppState;
use entrega_core::notifications::{self, NotificationDispatcher};
use entrega_primitives::models::app_config::AppConfig;
use eyre::Report;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting Entrega application...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. create database connection pool
    let pool = create_db_pool()?;

    // 5. build application state with the fan-out queue
    let (notifier, events) = NotificationDispatcher::bounded(config.notification_queue_depth);
    let state = AppState::new(pool, config, notifier)?;

    // 6. start the push fan-out worker
    notifications::worker::spawn(state.clone(), events);

    // 7. start background maintenance tasks
    spawn_background_tasks(state.clone());

    // 8. initialize metrics
    let (metric_layer, metric_handle) = observability::metrics::setup_metrics();

    // 9. build axum router
    let app = build_router(state.clone(), metric_layer, metric_handle)?;

    // 10. start HTTP server
    serve(app).await?;

    info!("Entrega application shut down gracefully");
    Ok(())
}
