pub mod dispatcher;
pub mod worker;

pub use dispatcher::{DeliveryEvent, NotificationDispatcher};
