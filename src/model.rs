//! Product records as stored and as returned by the API.

use serde::{Deserialize, Serialize};

/// A row of `productos`. This is the shape returned on create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub sku: String,
    pub precio: f64,
    pub stock: i64,
    pub categoria_id: Option<i64>,
    pub activo: bool,
}

/// A product joined with the name of its category, used by list and get.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub product: Product,
    pub categoria: Option<String>,
}

/// Validated input for an insert.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub sku: String,
    pub precio: f64,
    pub stock: i64,
    pub categoria_id: Option<i64>,
    pub activo: bool,
}

/// Partial update. `None` leaves a column untouched; for the nullable
/// columns `Some(None)` clears the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub nombre: Option<String>,
    pub descripcion: Option<Option<String>>,
    pub sku: Option<String>,
    pub precio: Option<f64>,
    pub stock: Option<i64>,
    pub categoria_id: Option<Option<i64>>,
    pub activo: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.descripcion.is_none()
            && self.sku.is_none()
            && self.precio.is_none()
            && self.stock.is_none()
            && self.categoria_id.is_none()
            && self.activo.is_none()
    }

    /// Applies the patch to an in-memory record.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(nombre) = &self.nombre {
            product.nombre = nombre.clone();
        }
        if let Some(descripcion) = &self.descripcion {
            product.descripcion = descripcion.clone();
        }
        if let Some(sku) = &self.sku {
            product.sku = sku.clone();
        }
        if let Some(precio) = self.precio {
            product.precio = precio;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(categoria_id) = self.categoria_id {
            product.categoria_id = categoria_id;
        }
        if let Some(activo) = self.activo {
            product.activo = activo;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Product {
        Product {
            id: 1,
            nombre: "Pen".into(),
            descripcion: Some("blue".into()),
            sku: "P-1".into(),
            precio: 1.5,
            stock: 100,
            categoria_id: Some(3),
            activo: true,
        }
    }

    #[test]
    fn default_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch {
            categoria_id: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut product = pen();
        let patch = ProductPatch {
            stock: Some(90),
            categoria_id: Some(None),
            ..Default::default()
        };
        patch.apply_to(&mut product);
        assert_eq!(product.stock, 90);
        assert_eq!(product.categoria_id, None);
        assert_eq!(product.nombre, "Pen");
        assert_eq!(product.descripcion.as_deref(), Some("blue"));
    }

    #[test]
    fn listing_serializes_flat() {
        let listing = ProductListing {
            product: pen(),
            categoria: Some("Office".into()),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["sku"], "P-1");
        assert_eq!(json["categoria"], "Office");
        assert_eq!(json["categoria_id"], 3);
        assert!(json.get("product").is_none());
    }
}
