//! SQLite-backed inventory store.

use crate::error::{StoreError, StoreResult};
use crate::store::ProductStore;
use async_trait::async_trait;
use inventory_core::{Product, ProductId};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

/// A `products` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    in_stock: Option<bool>,
    discount: Option<f64>,
}

impl ProductRow {
    fn into_entry(self) -> StoreResult<(ProductId, Product)> {
        let id = ProductId::try_from(self.id)
            .map_err(|_| StoreError::Internal(format!("negative product id in database: {}", self.id)))?;
        Ok((
            id,
            Product {
                name: self.name,
                price: self.price,
                in_stock: self.in_stock,
                discount: self.discount,
            },
        ))
    }
}

/// SQLite row ids are signed; anything outside that range cannot exist.
fn db_id(id: ProductId) -> StoreResult<i64> {
    i64::try_from(id).map_err(|_| StoreError::NotFound(id))
}

/// SQLite-based inventory store.
///
/// Ids come from an `AUTOINCREMENT` key, so they are never reused even after
/// the highest row is deleted.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Connect to `url` (e.g. `sqlite://data/inventory.db` or `sqlite::memory:`).
    pub async fn new(url: &str, max_connections: u32) -> StoreResult<Self> {
        let opts = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));

        // Every connection to `:memory:` is a separate database, so keep exactly
        // one connection alive for the life of the pool.
        let in_memory = url.contains(":memory:");
        let mut pool_opts = SqlitePoolOptions::new();
        pool_opts = if in_memory {
            pool_opts
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_opts.max_connections(max_connections.max(1))
        };

        let pool = pool_opts.connect_with(opts).await?;
        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Create the products table if it does not exist.
    async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                in_stock INTEGER,
                discount REAL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Insert `products` with their given ids, but only into an empty table.
    ///
    /// Returns the number of rows inserted.
    pub async fn seed_if_empty(
        &self,
        products: impl IntoIterator<Item = (ProductId, Product)>,
    ) -> StoreResult<u64> {
        let mut tx = self.pool.begin().await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&mut *tx)
            .await?;
        if count > 0 {
            tracing::debug!(count, "Products table already populated, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for (id, product) in products {
            sqlx::query(
                "INSERT INTO products (id, name, price, in_stock, discount) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(db_id(id)?)
            .bind(&product.name)
            .bind(product.price)
            .bind(product.in_stock)
            .bind(product.discount)
            .execute(&mut *tx)
            .await?;
            inserted += 1;
        }

        tx.commit().await?;
        tracing::info!(inserted, "Seeded products table");
        Ok(inserted)
    }
}

#[async_trait]
impl ProductStore for SqliteStore {
    async fn list_all(&self) -> StoreResult<BTreeMap<ProductId, Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, in_stock, discount FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_entry).collect()
    }

    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, in_stock, discount FROM products WHERE id = ?",
        )
        .bind(db_id(id)?)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        Ok(row.into_entry()?.1)
    }

    async fn create(&self, product: Product) -> StoreResult<ProductId> {
        let result = sqlx::query(
            "INSERT INTO products (name, price, in_stock, discount) VALUES (?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.discount)
        .execute(&self.pool)
        .await?;

        let rowid = result.last_insert_rowid();
        ProductId::try_from(rowid)
            .map_err(|_| StoreError::Internal(format!("unexpected row id: {rowid}")))
    }

    async fn update(&self, id: ProductId, product: Product) -> StoreResult<Product> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, price = ?, in_stock = ?, discount = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.in_stock)
        .bind(product.discount)
        .bind(db_id(id)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> StoreResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            "DELETE FROM products WHERE id = ? RETURNING id, name, price, in_stock, discount",
        )
        .bind(db_id(id)?)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(id))?;

        Ok(row.into_entry()?.1)
    }

    async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn backend_info(&self) -> StoreResult<String> {
        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(format!("SQLite {version}"))
    }
}
