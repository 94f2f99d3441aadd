use actix_web::{HttpResponse, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Request-scoped error. Nothing here is fatal to the process; each
/// variant maps to a single HTTP response for the offending request.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Malformed or missing field, rejected before touching storage.
    #[display(fmt = "{}", _0)]
    Validation(String),

    /// Uniqueness violation on create.
    #[display(fmt = "{}", _0)]
    Conflict(String),

    /// Referenced employee or attendance record is absent.
    #[display(fmt = "{}", _0)]
    NotFound(String),

    /// A store operation failed; surfaced as 500, never retried.
    #[display(fmt = "Internal Server Error")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err)
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Database(e) = self {
            error!(error = %e, "Database operation failed");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}
