//! Business rules applied when a product is created or updated through the API.
//!
//! Products produced by image analysis are returned as-is; callers decide
//! whether to fix them up before saving.

use crate::models::product::{Price, Product};

/// Highest accepted price (999,999.99)
pub const MAX_PRICE: Price = Price::from_cents(99_999_999);

const MAX_NAME_LEN: usize = 255;
const MAX_REFERENCE_LEN: usize = 50;
const MAX_BRAND_LEN: usize = 100;
const MAX_DEPARTMENT_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 1000;

/// A rule a product failed, with the wire name of the offending field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a product against the catalogue rules, reporting the first failure
pub fn validate_product(product: &Product) -> Result<(), ValidationError> {
    require("nombre", &product.name)?;
    if product.price <= Price::ZERO {
        return Err(ValidationError::new("precio", "must be greater than 0"));
    }
    require("referencia", &product.reference)?;
    require("marca", &product.brand)?;
    require("departamento", &product.department)?;
    if product.available_count < 0 {
        return Err(ValidationError::new("numeroDisponible", "must not be negative"));
    }

    if let Some(description) = &product.description {
        if description.trim().is_empty() {
            return Err(ValidationError::new("descripcion", "must not be blank when provided"));
        }
    }

    max_len("nombre", &product.name, MAX_NAME_LEN)?;
    max_len("referencia", &product.reference, MAX_REFERENCE_LEN)?;
    max_len("marca", &product.brand, MAX_BRAND_LEN)?;
    max_len("departamento", &product.department, MAX_DEPARTMENT_LEN)?;
    if let Some(description) = &product.description {
        max_len("descripcion", description, MAX_DESCRIPTION_LEN)?;
    }

    if product.price > MAX_PRICE {
        return Err(ValidationError::new(
            "precio",
            format!("must not exceed {}", MAX_PRICE),
        ));
    }

    Ok(())
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    Ok(())
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new(
            field,
            format!("must not exceed {} characters", max),
        ));
    }
    Ok(())
}
