use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use mongodb::error::Error as MongoError;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// JSON body of every error response.
#[derive(Serialize)]
struct ErrorResponse {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
}

#[derive(Debug, Error)]
pub enum AppError {
    // client errors
    #[error("Resource not found")]
    NotFound,

    /// Missing or unknown bearer token.
    #[error("Unauthorized access")]
    Unauthorized,

    /// Authenticated caller does not own the target resource.
    #[error("Ownership required: {0}")]
    Ownership(String),

    /// Field rules failed; the detail is reported per field.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Body could not be read into the expected shape.
    #[error("Unprocessable request: {0}")]
    BadParams(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    // server errors
    #[error("MongoDB error: {0}")]
    Mongo(#[from] MongoError),
    #[error("BSON encode error: {0}")]
    BsonSer(#[from] mongodb::bson::ser::Error),
    #[error("BSON decode error: {0}")]
    BsonDe(#[from] mongodb::bson::de::Error),
    #[error("Internal server error")]
    Internal(String),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::BadParams(e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized | AppError::Ownership(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::BadParams(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Mongo(_) | AppError::BsonSer(_) | AppError::BsonDe(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let (message, errors) = match self {
            AppError::NotFound | AppError::PayloadTooLarge => (self.to_string(), None),
            AppError::Unauthorized | AppError::Ownership(_) => ("Unauthorized".to_string(), None),
            AppError::Validation(e) => (self.to_string(), serde_json::to_value(e).ok()),
            AppError::BadParams(msg) => (msg.clone(), None),
            e => {
                error!("{:?}", e);
                ("Service error".to_string(), None)
            }
        };

        HttpResponse::build(status).json(ErrorResponse { code: status.as_u16(), message, errors })
    }
}
