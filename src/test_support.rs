//! In-memory `ProductStore` for service and HTTP tests. Only compiled for tests.

use crate::error::{AppError, SKU_TAKEN, SKU_TAKEN_BY_OTHER};
use crate::model::{NewProduct, Product, ProductListing, ProductPatch};
use crate::state::AppState;
use crate::store::ProductStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Tables {
    products: BTreeMap<i64, Product>,
    categories: BTreeMap<i64, String>,
    next_product_id: i64,
    next_category_id: i64,
}

impl Tables {
    fn listing(&self, product: &Product) -> ProductListing {
        ProductListing {
            product: product.clone(),
            categoria: product
                .categoria_id
                .and_then(|id| self.categories.get(&id).cloned()),
        }
    }

    fn sku_owner(&self, sku: &str) -> Option<i64> {
        self.products.values().find(|p| p.sku == sku).map(|p| p.id)
    }
}

/// Mirrors the table constraints: unique sku and the category foreign key.
#[derive(Default)]
pub struct MemoryProductStore {
    tables: Mutex<Tables>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_category(&self, nombre: &str) -> i64 {
        let mut t = self.tables.lock().unwrap();
        t.next_category_id += 1;
        let id = t.next_category_id;
        t.categories.insert(id, nombre.to_string());
        id
    }

    pub fn len(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }

    pub fn state(self) -> AppState {
        AppState {
            store: Arc::new(self),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<ProductListing>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.products.values().rev().map(|p| t.listing(p)).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<ProductListing>, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.products.get(&id).map(|p| t.listing(p)))
    }

    async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().products.contains_key(&id))
    }

    async fn sku_taken(&self, sku: &str, except_id: Option<i64>) -> Result<bool, AppError> {
        let t = self.tables.lock().unwrap();
        Ok(t.sku_owner(sku).is_some_and(|owner| Some(owner) != except_id))
    }

    async fn category_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().categories.contains_key(&id))
    }

    async fn insert(&self, product: &NewProduct) -> Result<Product, AppError> {
        let mut t = self.tables.lock().unwrap();
        if t.sku_owner(&product.sku).is_some() {
            return Err(AppError::Conflict(SKU_TAKEN.into()));
        }
        if let Some(categoria_id) = product.categoria_id {
            if !t.categories.contains_key(&categoria_id) {
                return Err(AppError::invalid_category());
            }
        }
        t.next_product_id += 1;
        let stored = Product {
            id: t.next_product_id,
            nombre: product.nombre.clone(),
            descripcion: product.descripcion.clone(),
            sku: product.sku.clone(),
            precio: product.precio,
            stock: product.stock,
            categoria_id: product.categoria_id,
            activo: product.activo,
        };
        t.products.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i64, patch: &ProductPatch) -> Result<bool, AppError> {
        let mut t = self.tables.lock().unwrap();
        if let Some(sku) = &patch.sku {
            if t.sku_owner(sku).is_some_and(|owner| owner != id) {
                return Err(AppError::Conflict(SKU_TAKEN_BY_OTHER.into()));
            }
        }
        if let Some(Some(categoria_id)) = patch.categoria_id {
            if !t.categories.contains_key(&categoria_id) {
                return Err(AppError::invalid_category());
            }
        }
        match t.products.get_mut(&id) {
            Some(product) => {
                patch.apply_to(product);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().products.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
