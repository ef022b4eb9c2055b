use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

const PUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Push transport over the Expo push HTTP API. Sends never raise into the
/// caller: the outcome is a value, classified so the registry can drop
/// permanently dead tokens.
#[derive(Clone)]
pub struct PushClient {
    http: Client,
    api_url: Url,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PushOutcome {
    Delivered,
    /// The provider reported the device token as permanently invalid.
    InvalidToken,
    Failed(String),
}

#[derive(Debug, Deserialize)]
struct ExpoPushResponse {
    data: Option<ExpoPushTicket>,
}

#[derive(Debug, Deserialize)]
struct ExpoPushTicket {
    status: String,
    message: Option<String>,
    details: Option<ExpoTicketDetails>,
}

#[derive(Debug, Deserialize)]
struct ExpoTicketDetails {
    error: Option<String>,
}

impl PushClient {
    pub fn new(http: Client, api_url: &str) -> Result<Self, entrega_primitives::ApiError> {
        let api_url = Url::parse(api_url).map_err(|_| {
            entrega_primitives::ApiError::Internal("Invalid push API URL".into())
        })?;
        Ok(Self { http, api_url })
    }

    pub async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: serde_json::Value,
    ) -> PushOutcome {
        let payload = json!({
            "to": device_token,
            "title": title,
            "body": body,
            "data": data,
        });

        let response = match self
            .http
            .post(self.api_url.clone())
            .timeout(PUSH_TIMEOUT)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("push provider unreachable: {}", e);
                return PushOutcome::Failed(format!("provider unreachable: {}", e));
            }
        };

        if !response.status().is_success() {
            return PushOutcome::Failed(format!("provider returned {}", response.status()));
        }

        match response.json::<ExpoPushResponse>().await {
            Ok(body) => classify_ticket(body.data),
            Err(e) => PushOutcome::Failed(format!("invalid provider response: {}", e)),
        }
    }
}

fn classify_ticket(ticket: Option<ExpoPushTicket>) -> PushOutcome {
    match ticket {
        Some(ticket) if ticket.status == "ok" => PushOutcome::Delivered,
        Some(ticket) => {
            let detail = ticket.details.and_then(|d| d.error);
            if detail.as_deref() == Some("DeviceNotRegistered") {
                PushOutcome::InvalidToken
            } else {
                PushOutcome::Failed(
                    ticket
                        .message
                        .or(detail)
                        .unwrap_or_else(|| "unknown provider error".into()),
                )
            }
        }
        None => PushOutcome::Failed("empty provider response".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<ExpoPushTicket> {
        serde_json::from_str::<ExpoPushResponse>(raw).unwrap().data
    }

    #[test]
    fn ok_ticket_is_delivered() {
        let outcome = classify_ticket(parse(r#"{"data":{"status":"ok","id":"x"}}"#));
        assert_eq!(outcome, PushOutcome::Delivered);
    }

    #[test]
    fn unregistered_device_is_invalid_token() {
        let raw = r#"{"data":{"status":"error","message":"not registered","details":{"error":"DeviceNotRegistered"}}}"#;
        assert_eq!(classify_ticket(parse(raw)), PushOutcome::InvalidToken);
    }

    #[test]
    fn other_provider_errors_are_plain_failures() {
        let raw = r#"{"data":{"status":"error","message":"rate limited","details":{"error":"MessageRateExceeded"}}}"#;
        assert!(matches!(
            classify_ticket(parse(raw)),
            PushOutcome::Failed(msg) if msg == "rate limited"
        ));
    }

    #[test]
    fn empty_response_is_a_failure() {
        assert!(matches!(classify_ticket(None), PushOutcome::Failed(_)));
    }
}
