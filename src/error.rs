use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No results: {0}")]
    NoResults(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify an error raised by an INSERT or UPDATE.
    ///
    /// Unique, foreign-key, not-null and check violations are the caller's
    /// fault and become `InvalidInput`; everything else stays a database failure.
    pub fn from_write(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                    return AppError::InvalidInput(format!(
                        "constraint violated: {}",
                        constraint
                    ));
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "serverError",
            AppError::MissingParameter(_) => "missingParameter",
            AppError::InvalidRequest(_) => "badRequest",
            AppError::InvalidInput(_) => "invalidInput",
            AppError::NoResults(_) => "noResults",
            AppError::NotFound(_) => "notFound",
        }
    }
}

// Malformed or mistyped JSON bodies
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal database error")
            }
            AppError::MissingParameter(ref e) => (StatusCode::UNPROCESSABLE_ENTITY, e.as_str()),
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::InvalidInput(ref e) => {
                tracing::info!("Rejected input: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, e.as_str())
            }
            AppError::NoResults(ref e) => {
                tracing::info!("No results: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.as_str()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "code": code,
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
