//! Product operations: validation order and domain signals on top of a `ProductStore`.

use crate::error::{AppError, NOTHING_TO_UPDATE, SKU_TAKEN, SKU_TAKEN_BY_OTHER};
use crate::model::{NewProduct, Product, ProductListing, ProductPatch};
use crate::store::ProductStore;

pub struct ProductService;

impl ProductService {
    /// All products with their category name, newest first.
    pub async fn list(store: &dyn ProductStore) -> Result<Vec<ProductListing>, AppError> {
        store.list().await
    }

    pub async fn get(store: &dyn ProductStore, id: i64) -> Result<ProductListing, AppError> {
        store.find(id).await?.ok_or_else(AppError::not_found)
    }

    /// Checks sku uniqueness, then the category reference, then inserts.
    pub async fn create(store: &dyn ProductStore, product: NewProduct) -> Result<Product, AppError> {
        if store.sku_taken(&product.sku, None).await? {
            return Err(AppError::Conflict(SKU_TAKEN.into()));
        }
        if let Some(categoria_id) = product.categoria_id {
            if !store.category_exists(categoria_id).await? {
                return Err(AppError::invalid_category());
            }
        }
        let created = store.insert(&product).await?;
        tracing::info!(id = created.id, sku = %created.sku, "product created");
        Ok(created)
    }

    /// Existence first, then sku and category checks, then the empty-patch check.
    pub async fn update(store: &dyn ProductStore, id: i64, patch: ProductPatch) -> Result<(), AppError> {
        if !store.exists(id).await? {
            return Err(AppError::not_found());
        }
        if let Some(sku) = &patch.sku {
            if store.sku_taken(sku, Some(id)).await? {
                return Err(AppError::Conflict(SKU_TAKEN_BY_OTHER.into()));
            }
        }
        if let Some(Some(categoria_id)) = patch.categoria_id {
            if !store.category_exists(categoria_id).await? {
                return Err(AppError::invalid_category());
            }
        }
        if patch.is_empty() {
            return Err(AppError::Validation(NOTHING_TO_UPDATE.into()));
        }
        if !store.update(id, &patch).await? {
            return Err(AppError::not_found());
        }
        tracing::info!(id, "product updated");
        Ok(())
    }

    pub async fn delete(store: &dyn ProductStore, id: i64) -> Result<(), AppError> {
        if !store.exists(id).await? {
            return Err(AppError::not_found());
        }
        if !store.delete(id).await? {
            return Err(AppError::not_found());
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
