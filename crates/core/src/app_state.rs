use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;

use crate::clients::{EmailClient, PushClient};
use crate::notifications::NotificationDispatcher;
use eyre::Result;
pub use entrega_primitives::models::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub email: EmailClient,
    pub push: PushClient,
    pub notifier: NotificationDispatcher,
}

impl AppState {
    pub fn new(
        db: DbPool,
        config: AppConfig,
        notifier: NotificationDispatcher,
    ) -> Result<Arc<Self>> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let email = EmailClient::from_config(&config.smtp)?;

        let push = PushClient::new(http.clone(), &config.push.expo_api_url)?;

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            email,
            push,
            notifier,
        }))
    }
}
