use crate::error::AnalysisError;
use crate::models::product::Product;
use serde_json::Value;

/// Decode an extracted JSON fragment into a [`Product`]
///
/// Unknown fields are ignored and missing ones take their zero value. Business
/// rules (positive price, non-negative stock) are not checked here; only a
/// type mismatch fails.
///
/// A top-level array is accepted as an extension and yields its first element,
/// since models sometimes wrap a single answer in a list. An empty array is a
/// decode error.
pub fn decode_product(fragment: &str) -> Result<Product, AnalysisError> {
    let value: Value = serde_json::from_str(fragment)
        .map_err(|e| AnalysisError::Decode(format!("product JSON: {}", e)))?;

    let object = match value {
        Value::Array(items) => items
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Decode("product JSON: empty array".to_string()))?,
        other => other,
    };

    serde_json::from_value(object)
        .map_err(|e| AnalysisError::Decode(format!("product JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Price;

    #[test]
    fn test_full_product() {
        let json = r#"{
            "referencia": "ACME-CH1",
            "nombre": "Chair",
            "marca": "Acme",
            "descripcion": "Oak dining chair",
            "precio": 45,
            "numeroDisponible": 12,
            "departamento": "Furniture"
        }"#;

        let product = decode_product(json).unwrap();
        assert_eq!(product.reference, "ACME-CH1");
        assert_eq!(product.name, "Chair");
        assert_eq!(product.brand, "Acme");
        assert_eq!(product.description.as_deref(), Some("Oak dining chair"));
        assert_eq!(product.price, Price::from_cents(4500));
        assert_eq!(product.available_count, 12);
        assert_eq!(product.department, "Furniture");
    }

    #[test]
    fn test_missing_fields_default() {
        let product = decode_product(r#"{"nombre":"Chair","precio":19.99}"#).unwrap();
        assert_eq!(product.name, "Chair");
        assert_eq!(product.price, Price::from_cents(1999));
        assert_eq!(product.reference, "");
        assert_eq!(product.brand, "");
        assert_eq!(product.description, None);
        assert_eq!(product.available_count, 0);
        assert_eq!(product.department, "");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let product = decode_product(r#"{"nombre":"Lamp","color":"red","confidence":0.4}"#).unwrap();
        assert_eq!(product.name, "Lamp");
    }

    #[test]
    fn test_type_mismatch_fails() {
        let err = decode_product(r#"{"numeroDisponible":"many"}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(_)));

        let err = decode_product(r#"{"nombre":{"es":"Silla"}}"#).unwrap_err();
        assert!(matches!(err, AnalysisError::Decode(_)));
    }

    #[test]
    fn test_stock_is_decoded_without_business_checks() {
        let product = decode_product(r#"{"nombre":"Chair","numeroDisponible":-1}"#).unwrap();
        assert_eq!(product.available_count, -1);

        let product = decode_product(r#"{"nombre":"Chair","numeroDisponible":"5"}"#).unwrap();
        assert_eq!(product.available_count, 5);

        let product = decode_product(r#"{"nombre":"Chair","numeroDisponible":5.0}"#).unwrap();
        assert_eq!(product.available_count, 5);
    }

    #[test]
    fn test_array_takes_first_element() {
        let product = decode_product(r#"[{"nombre":"A"},{"nombre":"B"}]"#).unwrap();
        assert_eq!(product.name, "A");
    }

    #[test]
    fn test_empty_array_fails() {
        assert!(matches!(decode_product("[]"), Err(AnalysisError::Decode(_))));
    }

    #[test]
    fn test_scalar_fails() {
        assert!(decode_product("[1]").is_err());
        assert!(decode_product("{not json}").is_err());
    }
}
