pub mod email;
pub mod push;

pub use email::EmailClient;
pub use push::{PushClient, PushOutcome};
