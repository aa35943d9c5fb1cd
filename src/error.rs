use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::extract::ExtractError;
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Failure of the image analysis pipeline
///
/// Every stage fails fast; nothing is retried and no placeholder product is produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The uploaded image could not be read
    #[error("failed to read image: {0}")]
    ImageRead(#[source] std::io::Error),

    /// Connection, timeout or body transfer failure talking to the completion endpoint
    #[error("completion endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    /// The completion endpoint answered with a non-2xx status
    #[error("completion endpoint returned {status}: {body}")]
    Remote { status: u16, body: String },

    /// A response envelope or product JSON did not have the expected shape
    #[error("failed to decode {0}")]
    Decode(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl AnalysisError {
    /// Stable machine-readable tag for this failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ImageRead(_) => "image_read_error",
            Self::Transport(_) => "transport_error",
            Self::Remote { .. } => "remote_error",
            Self::Decode(_) => "decode_error",
            Self::Extract(ExtractError::NoJsonFound) => "no_json_found",
            Self::Extract(ExtractError::UnbalancedJson) => "unbalanced_json",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::ImageRead(_) => StatusCode::BAD_REQUEST,
            Self::Transport(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Remote { .. } | Self::Decode(_) => StatusCode::BAD_GATEWAY,
            Self::Extract(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    /// Malformed request (bad id, missing upload field)
    BadRequest(String),
    /// Upload larger than the configured body limit
    PayloadTooLarge(String),
    /// Product failed business validation
    Validation(ValidationError),
    /// Product not found
    NotFound(String),
    /// Reference already taken by another product
    Conflict(String),
    /// Image analysis pipeline failure
    Analysis(AnalysisError),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Payload too large: {}", msg),
            Self::Validation(err) => write!(f, "Validation error: {}", err),
            Self::NotFound(msg) => write!(f, "Not found: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
            Self::Analysis(err) => write!(f, "Analysis failed: {}", err),
            Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            Self::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            Self::Analysis(err) => (err.status_code(), err.to_string()),
            Self::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let mut error = json!({
            "message": error_message,
            "type": error_type_name(&self),
        });
        match &self {
            Self::Validation(err) => error["field"] = json!(err.field),
            Self::Analysis(AnalysisError::Remote { status, .. }) => {
                error["upstream_status"] = json!(status)
            }
            _ => {}
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub(crate) fn error_type_name(error: &AppError) -> &'static str {
    match error {
        AppError::BadRequest(_) => "bad_request",
        AppError::PayloadTooLarge(_) => "payload_too_large",
        AppError::Validation(_) => "validation_error",
        AppError::NotFound(_) => "not_found",
        AppError::Conflict(_) => "conflict",
        AppError::Analysis(err) => err.kind(),
        AppError::InternalError(_) => "internal_error",
    }
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateReference(reference) => Self::Conflict(format!(
                "A product with reference '{}' already exists",
                reference
            )),
            StoreError::NotFound(id) => {
                Self::NotFound(format!("No product found with id {}", id))
            }
            StoreError::Database(e) => Self::InternalError(e.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}
