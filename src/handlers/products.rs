//! Product CRUD handlers

use crate::{
    error::AppError,
    models::product::{Product, StoredProduct},
    validation::validate_product,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::AppState;

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<StoredProduct>>, AppError> {
    Ok(Json(state.store.find_all().await?))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StoredProduct>, AppError> {
    check_id(id)?;

    state
        .store
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// POST /api/products/new
pub async fn create_product(
    State(state): State<AppState>,
    Json(product): Json<Product>,
) -> Result<(StatusCode, Json<StoredProduct>), AppError> {
    validate_product(&product)?;

    let stored = state.store.save(None, &product).await?;
    tracing::info!(id = stored.id, reference = %stored.product.reference, "Product created");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(product): Json<Product>,
) -> Result<Json<StoredProduct>, AppError> {
    check_id(id)?;
    validate_product(&product)?;

    let stored = state.store.save(Some(id), &product).await?;
    tracing::info!(id, "Product updated");

    Ok(Json(stored))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    check_id(id)?;

    if !state.store.exists_by_id(id).await? {
        return Err(not_found(id));
    }
    state.store.delete_by_id(id).await?;
    tracing::info!(id, "Product deleted");

    Ok(Json(json!({
        "message": format!("Product {} deleted", id),
    })))
}

fn check_id(id: i64) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::BadRequest(
            "Product id must be a positive integer".to_string(),
        ));
    }
    Ok(())
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("No product found with id {}", id))
}
