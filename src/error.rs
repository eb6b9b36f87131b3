//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Auth errors
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    TokenInvalid,
    #[error("authentication required")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,

    // Validation errors
    #[error("validation failed: {0}")]
    ValidationError(String),

    // Database errors
    #[error("database error: {0}")]
    DatabaseError(String),

    // Generic errors
    #[error("internal error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials
            | AppError::TokenInvalid
            | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::InvalidCredentials => "Invalid username or password",
            AppError::TokenInvalid => "Invalid token",
            AppError::Unauthorized => "Authentication required",
            AppError::Forbidden => "Sorry, you are not allowed to access this page",
            AppError::ValidationError(msg) => msg.as_str(),
            AppError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                "Database error occurred"
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error"
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> Self {
        AppError::TokenInvalid
    }
}
