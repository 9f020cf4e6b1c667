//! Product persistence: the `ProductStore` seam and its PostgreSQL implementation.

use crate::config::DatabaseConfig;
use crate::error::{AppError, PRECIO_OUT_OF_RANGE, SKU_TAKEN, SKU_TAKEN_BY_OTHER};
use crate::model::{NewProduct, Product, ProductListing, ProductPatch};
use crate::sql::{
    delete_product, insert_product, select_category_id, select_id_by_sku, select_listing_by_id,
    select_listings, select_product_id, update_product, QueryBuf,
};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{FromRow, PgPool, Postgres};

/// Data access for products and the category lookups they depend on.
///
/// Implementations only run single statements; the validation order lives in
/// [`crate::service::ProductService`].
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductListing>, AppError>;
    async fn find(&self, id: i64) -> Result<Option<ProductListing>, AppError>;
    async fn exists(&self, id: i64) -> Result<bool, AppError>;
    /// Whether `sku` belongs to some product other than `except_id`.
    async fn sku_taken(&self, sku: &str, except_id: Option<i64>) -> Result<bool, AppError>;
    async fn category_exists(&self, id: i64) -> Result<bool, AppError>;
    async fn insert(&self, product: &NewProduct) -> Result<Product, AppError>;
    /// Returns false when no row has `id`.
    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, AppError>;
    /// Returns false when no row has `id`.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
    async fn ping(&self) -> Result<(), AppError>;
}

/// Open the pool and make sure the database answers. Excess acquisitions
/// queue until a connection frees up.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let options = config.connect_options()?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        PgProductStore { pool }
    }

    async fn any_row(&self, q: &QueryBuf) -> Result<bool, AppError> {
        let id: Option<i64> = scalar(q).fetch_optional(&self.pool).await?;
        Ok(id.is_some())
    }
}

fn typed<'q, T>(q: &'q QueryBuf) -> QueryAs<'q, Postgres, T, PgArguments>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query_as(&q.sql), |query, p| query.bind(p))
}

fn scalar(q: &QueryBuf) -> QueryScalar<'_, Postgres, i64, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "query");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query_scalar(&q.sql), |query, p| query.bind(p))
}

fn statement(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
    q.params
        .iter()
        .cloned()
        .fold(sqlx::query(&q.sql), |query, p| query.bind(p))
}

/// SQLSTATE `numeric_value_out_of_range`.
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Constraint violations that slip past the pre-checks (two writers racing)
/// map to the same signals the pre-checks produce.
fn translate_write_error(err: sqlx::Error, sku_message: &str) -> AppError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return AppError::Conflict(sku_message.to_string());
        }
        if db.is_foreign_key_violation() {
            return AppError::invalid_category();
        }
        if db.code().as_deref() == Some(NUMERIC_OUT_OF_RANGE) {
            return AppError::Validation(PRECIO_OUT_OF_RANGE.into());
        }
    }
    AppError::Db(err)
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(&self) -> Result<Vec<ProductListing>, AppError> {
        let q = select_listings();
        Ok(typed(&q).fetch_all(&self.pool).await?)
    }

    async fn find(&self, id: i64) -> Result<Option<ProductListing>, AppError> {
        let q = select_listing_by_id(id);
        Ok(typed(&q).fetch_optional(&self.pool).await?)
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        self.any_row(&select_product_id(id)).await
    }

    async fn sku_taken(&self, sku: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        self.any_row(&select_id_by_sku(sku, except_id)).await
    }

    async fn category_exists(&self, id: i64) -> Result<bool, AppError> {
        self.any_row(&select_category_id(id)).await
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, AppError> {
        let q = insert_product(product);
        typed(&q)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, SKU_TAKEN))
    }

    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, AppError> {
        let Some(q) = update_product(id, patch) else {
            return self.exists(id).await;
        };
        let result = statement(&q)
            .execute(&self.pool)
            .await
            .map_err(|e| translate_write_error(e, SKU_TAKEN_BY_OTHER))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let q = delete_product(id);
        let result = statement(&q).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
