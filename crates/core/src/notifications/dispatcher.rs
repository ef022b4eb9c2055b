use tokio::sync::mpsc;
use tracing::warn;
use uuid::Uuid;

/// A parcel-lifecycle event worth telling couriers about. Dispatched after
/// the triggering transaction commits.
#[derive(Debug, Clone)]
pub enum DeliveryEvent {
    /// A new package is ready for pickup; fans out to every registered
    /// device.
    Created {
        delivery_id: Uuid,
        package_location: String,
    },
    /// A delivery on an assigned route was cancelled; fans out to the
    /// assignee's devices only.
    Cancelled {
        delivery_id: Uuid,
        description: String,
        assigned_to: Uuid,
    },
}

/// Sender half of the fan-out queue. Enqueueing never blocks the request
/// path: when the queue is full the event is dropped with a warning.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<DeliveryEvent>,
}

impl NotificationDispatcher {
    pub fn bounded(depth: usize) -> (Self, mpsc::Receiver<DeliveryEvent>) {
        let (tx, rx) = mpsc::channel(depth);
        (Self { tx }, rx)
    }

    pub fn dispatch(&self, event: DeliveryEvent) {
        if let Err(e) = self.tx.try_send(event) {
            warn!("dropping delivery event, queue unavailable: {}", e);
        }
    }
}
