/// Error types for Resume Service
///
/// Every error is rendered as `{"error": "<message>"}` with the matching HTTP
/// status. Storage failures never leak their details to clients: they are
/// logged and replaced by a generic message.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for resume-service operations
pub type Result<T> = std::result::Result<T, AppError>;

const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Request body failed validation
    #[error("{0}")]
    ValidationError(String),

    /// Resource not found
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid credentials
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource
    #[error("{0}")]
    Forbidden(String),

    /// Bad request
    #[error("{0}")]
    BadRequest(String),

    /// Internal error with a client-safe message
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Replace a server-side failure with a public message.
    ///
    /// Client errors (4xx) pass through untouched so handlers can chain this
    /// on any service call.
    pub fn masked(self, public_message: &str) -> AppError {
        match self {
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "{}", public_message);
                AppError::Internal(public_message.to_string())
            }
            other => other,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::DatabaseError(_) => {
                tracing::error!(error = %self, "unmasked database error reached response");
                GENERIC_INTERNAL_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            other => AppError::DatabaseError(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::ValidationError(message)
    }
}
