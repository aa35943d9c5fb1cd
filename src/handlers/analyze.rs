//! Image analysis handler
//!
//! Accepts a multipart upload and answers with the product the model read off
//! the photo. Each pipeline failure kind maps to its own error `type`, so
//! clients can tell a bad image from an unreachable model from unusable output.

use crate::{
    error::{error_type_name, AnalysisError, AppError},
    metrics,
    models::product::Product,
};
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Json,
};

use super::AppState;

/// Multipart field carrying the image
pub const FILE_FIELD: &str = "file";

/// POST /api/products/analyze
///
/// Example: curl -F file=@chair.jpg http://localhost:8080/api/products/analyze
pub async fn analyze_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Product>, AppError> {
    let image = match read_file_field(&mut multipart).await {
        Ok(image) => image,
        Err(e) => {
            record_upload_failure(state.analyzer.model(), &e);
            return Err(e);
        }
    };

    let product = state.analyzer.analyze(&image).await?;
    Ok(Json(product))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        upload_error(e, |e| {
            AppError::BadRequest(format!("Invalid multipart body: {}", e))
        })
    })? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let bytes = field.bytes().await.map_err(|e| {
            upload_error(e, |e| {
                AnalysisError::ImageRead(std::io::Error::other(e.to_string())).into()
            })
        })?;

        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        return Ok(bytes.to_vec());
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{}'",
        FILE_FIELD
    )))
}

/// Body-limit rejections become 413; anything else goes through `otherwise`
fn upload_error(
    error: MultipartError,
    otherwise: impl FnOnce(MultipartError) -> AppError,
) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(error.body_text());
    }
    otherwise(error)
}

/// Upload failures never reach the analyzer, so they are counted here
fn record_upload_failure(model: &str, error: &AppError) {
    if matches!(error, AppError::Analysis(_) | AppError::PayloadTooLarge(_)) {
        metrics::record_error(model, error_type_name(error));
    }
}
