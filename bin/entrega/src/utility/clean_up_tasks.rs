use entrega_core::repositories::TokenRepository;
use entrega_core::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, error, info};

const DAILY_CLEANUP_INTERVAL: Duration = Duration::from_secs(60 * 60 * 24);

pub fn spawn_background_tasks(state: Arc<AppState>) {
    let state_clone = state.clone();

    // Expired credential tokens are ignored by every lookup; this only
    // keeps the table from growing without bound.
    tokio::spawn(async move {
        info!("Starting daily credential token cleanup task");
        cleanup_credential_tokens(state_clone).await;
    });

    info!("Background maintenance tasks spawned");
}

async fn cleanup_credential_tokens(state: Arc<AppState>) {
    let mut interval = interval(DAILY_CLEANUP_INTERVAL);
    interval.tick().await;

    loop {
        interval.tick().await;

        let Ok(mut conn) = state.db.get() else {
            error!("Credential token cleanup: DB connection failed");
            continue;
        };

        match TokenRepository::delete_expired(&mut conn) {
            Ok(0) => debug!("No expired credential tokens"),
            Ok(n) => info!("Removed {} expired credential tokens", n),
            Err(e) => error!("Credential token cleanup failed: {}", e),
        }
    }
}
