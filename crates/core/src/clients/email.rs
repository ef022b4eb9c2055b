use entrega_primitives::error::ApiError;
use entrega_primitives::models::app_config::SmtpInfo;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{info, warn};

const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound email. Without SMTP_HOST the client runs in log-only mode so
/// local development and tests never block on a mail provider.
#[derive(Clone)]
pub struct EmailClient {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl EmailClient {
    pub fn from_config(cfg: &SmtpInfo) -> Result<Self, ApiError> {
        let from: Mailbox = cfg
            .smtp_from
            .parse()
            .map_err(|_| ApiError::Internal(format!("Invalid SMTP_FROM address: {}", cfg.smtp_from)))?;

        let transport = match cfg.smtp_host.as_deref() {
            Some(host) => {
                let credentials = Credentials::new(
                    cfg.smtp_username.clone(),
                    cfg.smtp_password.expose_secret().to_string(),
                );
                Some(
                    AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                        .map_err(|e| ApiError::Internal(format!("Invalid SMTP relay: {}", e)))?
                        .credentials(credentials)
                        .timeout(Some(SMTP_TIMEOUT))
                        .build(),
                )
            }
            None => None,
        };

        Ok(Self { transport, from })
    }

    /// Failures are returned as values; callers decide whether a missed
    /// email degrades or fails their flow.
    pub async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), ApiError> {
        let Some(transport) = &self.transport else {
            info!(to, subject, "SMTP not configured, skipping email send");
            return Ok(());
        };

        let recipient: Mailbox = to
            .parse()
            .map_err(|_| ApiError::Internal(format!("Invalid recipient address: {}", to)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| ApiError::Internal(format!("Email build failed: {}", e)))?;

        transport.send(message).await.map_err(|e| {
            warn!(to, "email delivery failed: {}", e);
            ApiError::Internal("Email delivery failed".into())
        })?;

        Ok(())
    }
}
