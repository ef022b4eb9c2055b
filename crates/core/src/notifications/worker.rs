use crate::app_state::AppState;
use crate::clients::PushOutcome;
use crate::notifications::DeliveryEvent;
use crate::repositories::DeviceRepository;
use entrega_primitives::error::ApiError;
use entrega_primitives::models::entities::device::Device;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Consumes delivery events and fans pushes out to the relevant devices.
/// Runs decoupled from the request path: nothing here can fail a request,
/// and a dead device token heals the registry by deleting its row.
pub fn spawn(state: Arc<AppState>, mut rx: mpsc::Receiver<DeliveryEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("notification fan-out worker started");
        while let Some(event) = rx.recv().await {
            if let Err(e) = handle_event(&state, event).await {
                error!("notification fan-out failed: {}", e);
            }
        }
        info!("notification fan-out worker stopped");
    })
}

async fn handle_event(state: &AppState, event: DeliveryEvent) -> Result<(), ApiError> {
    match event {
        DeliveryEvent::Created {
            delivery_id,
            package_location,
        } => {
            let devices = {
                let mut conn = state.db.get()?;
                DeviceRepository::find_all(&mut conn)?
            };
            let body = format!(
                "There is a new package at {} ready for pickup.",
                package_location
            );
            push_all(
                state,
                &devices,
                "New delivery available",
                &body,
                json!({ "screen": "Home", "deliveryId": delivery_id }),
            )
            .await;
        }
        DeliveryEvent::Cancelled {
            delivery_id,
            description,
            assigned_to,
        } => {
            let devices = {
                let mut conn = state.db.get()?;
                DeviceRepository::find_by_user(&mut conn, assigned_to)?
            };
            let body = if description.is_empty() {
                format!(
                    "Delivery #{} was cancelled and removed from your route.",
                    delivery_id
                )
            } else {
                format!(
                    "Delivery #{} to {} was cancelled and removed from your route.",
                    delivery_id, description
                )
            };
            push_all(
                state,
                &devices,
                "Delivery cancelled",
                &body,
                json!({ "screen": "Home", "deliveryId": delivery_id }),
            )
            .await;
        }
    }
    Ok(())
}

async fn push_all(
    state: &AppState,
    devices: &[Device],
    title: &str,
    body: &str,
    data: serde_json::Value,
) {
    for device in devices {
        match state
            .push
            .send(&device.device_token, title, body, data.clone())
            .await
        {
            PushOutcome::Delivered => {}
            PushOutcome::InvalidToken => {
                info!(
                    device_token = %device.device_token,
                    "push token no longer registered, removing device"
                );
                match state.db.get() {
                    Ok(mut conn) => {
                        if let Err(e) =
                            DeviceRepository::delete_by_token(&mut conn, &device.device_token)
                        {
                            error!("failed to deregister dead device: {}", e);
                        }
                    }
                    Err(e) => error!("failed to deregister dead device: {}", e),
                }
            }
            PushOutcome::Failed(reason) => {
                warn!(device_id = %device.id, "push send failed: {}", reason);
            }
        }
    }
}
