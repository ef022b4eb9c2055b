pub mod error;
pub mod models;
pub mod schema;

pub use error::{ApiError, AuthError};
pub use models::{ApiResponse, AppConfig};
