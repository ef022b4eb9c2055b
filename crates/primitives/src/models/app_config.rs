use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt: JwtInfo,

    pub app_url: String,

    pub smtp: SmtpInfo,

    pub push: PushInfo,

    /// Depth of the delivery-event queue feeding the push fan-out worker.
    pub notification_queue_depth: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt: JwtInfo::from_env()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            smtp: SmtpInfo::from_env(),

            push: PushInfo::from_env(),

            notification_queue_depth: env::var("NOTIFICATION_QUEUE_DEPTH")
                .unwrap_or_else(|_| "256".into())
                .parse()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct JwtInfo {
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl JwtInfo {
    pub fn from_env() -> Result<Self, Report> {
        let secret = env::var("JWT_SECRET").map_err(|_| eyre::eyre!("JWT_SECRET must be set"))?;
        if secret.len() < 32 {
            return Err(eyre::eyre!("JWT_SECRET must be at least 32 characters"));
        }

        Ok(Self {
            jwt_secret: SecretString::from(secret),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "2".into())
                .parse()?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "entrega".into()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "entrega_api".into()),
        })
    }
}

/// SMTP settings. All optional: with no SMTP_HOST the email client runs in
/// log-only mode, which is what local development and the test suite use.
#[derive(Debug, Clone)]
pub struct SmtpInfo {
    pub smtp_host: Option<String>,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub smtp_from: String,
}

impl SmtpInfo {
    pub fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_username: env::var("SMTP_USERNAME").unwrap_or_default(),
            smtp_password: SecretString::from(env::var("SMTP_PASSWORD").unwrap_or_default()),
            smtp_from: env::var("SMTP_FROM")
                .unwrap_or_else(|_| "Entrega <no-reply@entrega.app>".into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PushInfo {
    pub expo_api_url: String,
}

impl PushInfo {
    pub fn from_env() -> Self {
        Self {
            expo_api_url: env::var("EXPO_PUSH_API_URL")
                .unwrap_or_else(|_| "https://exp.host/--/api/v2/push/send".into()),
        }
    }
}
