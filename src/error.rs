use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

/// Error taxonomy for the contribution service.
///
/// `Validation` covers bad input: missing city selection, empty salary
/// set, malformed import rows. `Persistence` wraps row-store failures.
/// `Configuration` is reserved for a missing/unreachable backing store
/// detected at request time.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "configuration error: {}", _0)]
    Configuration(String),

    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "storage error: {}", _0)]
    Persistence(sqlx::Error),
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Persistence(e)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal detail stays in the logs; clients get a stable message.
        let message = match self {
            AppError::Validation(_) => self.to_string(),
            AppError::Configuration(_) | AppError::Persistence(_) => {
                "Internal Server Error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(json!({
            "message": message
        }))
    }
}
