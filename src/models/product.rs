use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Product record
///
/// Wire names follow the catalogue's original Spanish schema, which is also the
/// vocabulary the analysis prompt asks the model to answer in. English names are
/// accepted on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    /// Unique business code
    #[serde(rename = "referencia", alias = "reference", deserialize_with = "null_as_default")]
    pub reference: String,
    #[serde(rename = "nombre", alias = "name", deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "marca", alias = "brand", deserialize_with = "null_as_default")]
    pub brand: String,
    #[serde(rename = "descripcion", alias = "description")]
    pub description: Option<String>,
    #[serde(rename = "precio", alias = "price", deserialize_with = "null_as_default")]
    pub price: Price,
    /// Units in stock; signed so a negative count from the model survives
    /// decoding and is rejected by validation instead
    #[serde(
        rename = "numeroDisponible",
        alias = "availableCount",
        alias = "available_count",
        deserialize_with = "lenient_count"
    )]
    pub available_count: i32,
    #[serde(rename = "departamento", alias = "department", deserialize_with = "null_as_default")]
    pub department: String,
}

/// A product that has been persisted by [`crate::store::ProductStore`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredProduct {
    pub id: i64,
    #[serde(flatten)]
    pub product: Product,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Monetary amount held as integer cents
///
/// Serialized as a JSON number (`19.99`). Deserializes from a number or a numeric
/// string; anything else is a type error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Round a floating point amount to the nearest cent
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let cents = (amount * 100.0).round();
        if cents.abs() > i64::MAX as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPrice {
            Integer(i64),
            Float(f64),
            Text(String),
        }

        let amount = match RawPrice::deserialize(deserializer)? {
            RawPrice::Integer(units) => {
                return units
                    .checked_mul(100)
                    .map(Price)
                    .ok_or_else(|| serde::de::Error::custom("price out of range"));
            }
            RawPrice::Float(amount) => amount,
            RawPrice::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                serde::de::Error::custom(format!("invalid price: {:?}", text))
            })?,
        };

        Price::from_f64(amount).ok_or_else(|| serde::de::Error::custom("price out of range"))
    }
}

/// Stock count from an integer, an integral float or a numeric string; `null` is 0
fn lenient_count<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    let count = match Option::<RawCount>::deserialize(deserializer)? {
        None => return Ok(0),
        Some(RawCount::Integer(count)) => count,
        Some(RawCount::Float(count)) if count.fract() == 0.0 && count.is_finite() => count as i64,
        Some(RawCount::Float(count)) => {
            return Err(serde::de::Error::custom(format!(
                "invalid stock count: {}",
                count
            )))
        }
        Some(RawCount::Text(text)) => text.trim().parse::<i64>().map_err(|_| {
            serde::de::Error::custom(format!("invalid stock count: {:?}", text))
        })?,
    };

    i32::try_from(count).map_err(|_| serde::de::Error::custom("stock count out of range"))
}

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(1999).to_string(), "19.99");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_price_accepts_numbers_and_strings() {
        let price: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(price.cents(), 1999);

        let price: Price = serde_json::from_str("3").unwrap();
        assert_eq!(price.cents(), 300);

        let price: Price = serde_json::from_str("\" 4.5 \"").unwrap();
        assert_eq!(price.cents(), 450);

        assert!(serde_json::from_str::<Price>("true").is_err());
        assert!(serde_json::from_str::<Price>("\"cheap\"").is_err());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(1999)).unwrap();
        assert_eq!(json, "19.99");
    }

    #[test]
    fn test_product_uses_spanish_wire_names() {
        let product = Product {
            reference: "ACME-CH1".to_string(),
            name: "Chair".to_string(),
            brand: "Acme".to_string(),
            description: None,
            price: Price::from_cents(1999),
            available_count: 3,
            department: "Furniture".to_string(),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["referencia"], "ACME-CH1");
        assert_eq!(value["nombre"], "Chair");
        assert_eq!(value["numeroDisponible"], 3);
        assert_eq!(value["precio"], 19.99);
    }

    #[test]
    fn test_product_accepts_english_aliases_and_nulls() {
        let json = r#"{"name": "Lamp", "brand": null, "availableCount": 2, "price": "10"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Lamp");
        assert_eq!(product.brand, "");
        assert_eq!(product.available_count, 2);
        assert_eq!(product.price, Price::from_cents(1000));
    }

    #[test]
    fn test_stock_count_is_lenient() {
        let product: Product = serde_json::from_str(r#"{"numeroDisponible": -1}"#).unwrap();
        assert_eq!(product.available_count, -1);

        let product: Product = serde_json::from_str(r#"{"numeroDisponible": " 5 "}"#).unwrap();
        assert_eq!(product.available_count, 5);

        let product: Product = serde_json::from_str(r#"{"numeroDisponible": 5.0}"#).unwrap();
        assert_eq!(product.available_count, 5);

        let product: Product = serde_json::from_str(r#"{"numeroDisponible": null}"#).unwrap();
        assert_eq!(product.available_count, 0);
    }

    #[test]
    fn test_stock_count_rejects_non_integers() {
        assert!(serde_json::from_str::<Product>(r#"{"numeroDisponible": 2.5}"#).is_err());
        assert!(serde_json::from_str::<Product>(r#"{"numeroDisponible": "many"}"#).is_err());
        assert!(serde_json::from_str::<Product>(r#"{"numeroDisponible": 3000000000}"#).is_err());
        assert!(serde_json::from_str::<Product>(r#"{"numeroDisponible": true}"#).is_err());
    }

    #[test]
    fn test_stored_product_flattens_fields() {
        let stored = StoredProduct {
            id: 7,
            product: Product {
                name: "Mug".to_string(),
                ..Default::default()
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["id"], 7);
        assert_eq!(value["nombre"], "Mug");
        assert!(value.get("product").is_none());
    }
}
