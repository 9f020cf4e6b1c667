//! Creates the `categorias` and `productos` tables when they are missing.
//! Categories come first because products reference them.

use crate::error::AppError;
use crate::sql::{CATEGORIES_TABLE, PRODUCTS_TABLE};
use sqlx::PgPool;

fn ddl_statements() -> Vec<String> {
    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                nombre TEXT NOT NULL
            )
            "#,
            CATEGORIES_TABLE
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                nombre TEXT NOT NULL,
                descripcion TEXT,
                sku TEXT NOT NULL,
                precio NUMERIC(12, 2) NOT NULL,
                stock BIGINT NOT NULL,
                categoria_id BIGINT REFERENCES {} (id),
                activo BOOLEAN NOT NULL DEFAULT TRUE,
                CONSTRAINT productos_sku_key UNIQUE (sku)
            )
            "#,
            PRODUCTS_TABLE, CATEGORIES_TABLE
        ),
    ]
}

/// Idempotent: every statement is `IF NOT EXISTS`.
pub async fn apply_migrations(pool: &PgPool) -> Result<(), AppError> {
    for ddl in ddl_statements() {
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}
