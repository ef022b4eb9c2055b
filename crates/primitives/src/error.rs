use crate::models::response::ApiResponse;
use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use std::fmt;

/// Domain error for every flow. Each variant maps to a stable
/// (code, description, HTTP status) triple; nothing else leaks to clients.
#[derive(Debug)]
pub enum ApiError {
    NotFound {
        code: &'static str,
        description: String,
    },
    Conflict {
        code: &'static str,
        description: String,
    },
    InvalidState {
        code: &'static str,
        description: String,
    },
    /// Wrong PIN or rejected credential token. Deliberately under-specific:
    /// the same code/description covers wrong, expired, unknown and
    /// locked-out secrets so clients get no brute-force oracle.
    InvalidSecret {
        code: &'static str,
        description: String,
        status: StatusCode,
    },
    Validation(validator::ValidationErrors),
    Auth(AuthError),
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(code: &'static str, description: impl Into<String>) -> Self {
        ApiError::NotFound {
            code,
            description: description.into(),
        }
    }

    pub fn conflict(code: &'static str, description: impl Into<String>) -> Self {
        ApiError::Conflict {
            code,
            description: description.into(),
        }
    }

    pub fn invalid_state(code: &'static str, description: impl Into<String>) -> Self {
        ApiError::InvalidState {
            code,
            description: description.into(),
        }
    }

    pub fn invalid_secret(
        code: &'static str,
        description: impl Into<String>,
        status: StatusCode,
    ) -> Self {
        ApiError::InvalidSecret {
            code,
            description: description.into(),
            status,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound { code, .. } => code,
            ApiError::Conflict { code, .. } => code,
            ApiError::InvalidState { code, .. } => code,
            ApiError::InvalidSecret { code, .. } => code,
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Auth(_) => "UNAUTHORIZED",
            ApiError::Database(_) | ApiError::DatabaseConnection(_) | ApiError::Internal(_) => {
                "INTERNAL_ERROR"
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { code, description }
            | ApiError::Conflict { code, description }
            | ApiError::InvalidState { code, description } => {
                write!(f, "{}: {}", code, description)
            }
            ApiError::InvalidSecret {
                code, description, ..
            } => write!(f, "{}: {}", code, description),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::Auth(e) => write!(f, "Authentication error: {}", e),
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Validation(e) => Some(e),
            ApiError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<r2d2::PoolError> for ApiError {
    fn from(err: r2d2::PoolError) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound { description, .. } => (StatusCode::NOT_FOUND, description),
            ApiError::Conflict { description, .. } => (StatusCode::CONFLICT, description),
            ApiError::InvalidState { description, .. } => (StatusCode::BAD_REQUEST, description),
            ApiError::InvalidSecret {
                description,
                status,
                ..
            } => (status, description),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                format!("Validation error: {}", errors),
            ),
            ApiError::Auth(e) => e.into(),
            // Storage detail stays in the logs, not in the response body.
            ApiError::Database(_) | ApiError::DatabaseConnection(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Database(ref e) = self {
            tracing::error!("database error: {}", e);
        }
        if let ApiError::DatabaseConnection(ref e) = self {
            tracing::error!("database connection error: {}", e);
        }
        let (status, message): (StatusCode, String) = self.into();
        let body = ApiResponse::<()>::message(message, status.as_u16());
        (status, Json(body)).into_response()
    }
}

/// Failures raised by the JWT middleware before a request reaches a handler.
#[derive(Debug)]
pub enum AuthError {
    MissingHeader,
    InvalidFormat,
    InvalidToken(String),
    InvalidCredentials,
    EmailNotVerified,
    InternalError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Authorization header required"),
            AuthError::InvalidFormat => write!(f, "Invalid Authorization format"),
            AuthError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AuthError::InvalidCredentials => write!(f, "Invalid email or password"),
            AuthError::EmailNotVerified => write!(f, "Email is not verified"),
            AuthError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl From<AuthError> for (StatusCode, String) {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingHeader => (
                StatusCode::UNAUTHORIZED,
                "Authorization header required".to_string(),
            ),
            AuthError::InvalidFormat => (
                StatusCode::BAD_REQUEST,
                "Invalid Authorization format".to_string(),
            ),
            AuthError::InvalidToken(msg) => {
                (StatusCode::UNAUTHORIZED, format!("Invalid token: {}", msg))
            }
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::EmailNotVerified => (
                StatusCode::UNAUTHORIZED,
                "Email is not verified".to_string(),
            ),
            AuthError::InternalError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", msg),
            ),
        }
    }
}
