//! SQLite-backed product persistence
//!
//! The schema lives in `migrations/` and is applied on connect. Uniqueness of
//! `reference` is enforced by a unique index and surfaces as
//! [`StoreError::DuplicateReference`].

use crate::config::DatabaseConfig;
use crate::models::product::{Price, Product, StoredProduct};
use anyhow::Context;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("reference '{0}' is already in use")]
    DuplicateReference(String),

    #[error("no product with id {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    reference: String,
    name: String,
    brand: String,
    description: Option<String>,
    price_cents: i64,
    available_count: i64,
    department: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for StoredProduct {
    type Error = StoreError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let available_count = i32::try_from(row.available_count)
            .map_err(|e| StoreError::Database(sqlx::Error::Decode(Box::new(e))))?;

        Ok(StoredProduct {
            id: row.id,
            product: Product {
                reference: row.reference,
                name: row.name,
                brand: row.brand,
                description: row.description,
                price: Price::from_cents(row.price_cents),
                available_count,
                department: row.department,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = "id, reference, name, brand, description, price_cents, \
     available_count, department, created_at, updated_at";

/// Product store handle
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: SqlitePool,
}

impl ProductStore {
    /// Connect and run migrations
    ///
    /// An in-memory URL gets a single long-lived connection, since every SQLite
    /// memory connection is its own database.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let in_memory = config.url.contains(":memory:");

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(30));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(30));
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(config.max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .context("Failed to connect to product database")?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running migrations on it
    pub async fn from_pool(pool: SqlitePool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run product database migrations")?;

        tracing::info!("Product database migrations completed");
        Ok(Self { pool })
    }

    /// Round-trip a trivial query
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn find_all(&self) -> Result<Vec<StoredProduct>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products ORDER BY id ASC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StoredProduct::try_from).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<StoredProduct>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            SELECT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(StoredProduct::try_from).transpose()
    }

    /// Insert when `id` is `None`, otherwise overwrite the product with that id
    ///
    /// Updating a missing id is `NotFound`.
    pub async fn save(
        &self,
        id: Option<i64>,
        product: &Product,
    ) -> Result<StoredProduct, StoreError> {
        let now = Utc::now();
        let result = match id {
            None => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "INSERT INTO products (reference, name, brand, description, price_cents, \
                     available_count, department, created_at, updated_at)
                     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                     RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(&product.reference)
                .bind(&product.name)
                .bind(&product.brand)
                .bind(&product.description)
                .bind(product.price.cents())
                .bind(i64::from(product.available_count))
                .bind(&product.department)
                .bind(now)
                .bind(now)
                .fetch_one(&self.pool)
                .await
            }
            Some(id) => {
                let row = sqlx::query_as::<_, ProductRow>(&format!(
                    "UPDATE products
                     SET reference = ?, name = ?, brand = ?, description = ?, price_cents = ?,
                         available_count = ?, department = ?, updated_at = ?
                     WHERE id = ?
                     RETURNING {}",
                    SELECT_COLUMNS
                ))
                .bind(&product.reference)
                .bind(&product.name)
                .bind(&product.brand)
                .bind(&product.description)
                .bind(product.price.cents())
                .bind(i64::from(product.available_count))
                .bind(&product.department)
                .bind(now)
                .bind(id)
                .fetch_optional(&self.pool)
                .await;

                match row {
                    Ok(Some(row)) => Ok(row),
                    Ok(None) => return Err(StoreError::NotFound(id)),
                    Err(e) => Err(e),
                }
            }
        };

        match result {
            Ok(row) => {
                let stored = StoredProduct::try_from(row)?;
                tracing::debug!(id = stored.id, reference = %stored.product.reference, "Product saved");
                Ok(stored)
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(StoreError::DuplicateReference(product.reference.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, "Product deleted");
        Ok(())
    }
}
