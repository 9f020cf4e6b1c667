//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for `productos`.

use super::PgBindValue;
use crate::model::{NewProduct, ProductPatch};

pub const PRODUCTS_TABLE: &str = "productos";
pub const CATEGORIES_TABLE: &str = "categorias";

/// Columns of a product record. `precio` is NUMERIC in the table and is read
/// back as float8 so it decodes into `f64`.
const PRODUCT_COLUMNS: &str =
    "id, nombre, descripcion, sku, precio::float8 AS precio, stock, categoria_id, activo";

const LISTING_COLUMNS: &str = "p.id, p.nombre, p.descripcion, p.sku, p.precio::float8 AS precio, p.stock, \
     c.nombre AS categoria, p.activo, p.categoria_id";

#[derive(Debug, Default)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<PgBindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf::default()
    }

    /// Appends a parameter and returns its placeholder, with a cast when given.
    fn push_param(&mut self, v: impl Into<PgBindValue>, cast: Option<&str>) -> String {
        self.params.push(v.into());
        let n = self.params.len();
        match cast {
            Some(t) => format!("${}::{}", n, t),
            None => format!("${}", n),
        }
    }
}

fn listing_from() -> String {
    format!(
        "FROM {} p LEFT JOIN {} c ON p.categoria_id = c.id",
        PRODUCTS_TABLE, CATEGORIES_TABLE
    )
}

/// All products with their category name, newest id first.
pub fn select_listings() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} {} ORDER BY p.id DESC", LISTING_COLUMNS, listing_from());
    q
}

pub fn select_listing_by_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id, None);
    q.sql = format!("SELECT {} {} WHERE p.id = {}", LISTING_COLUMNS, listing_from(), ph);
    q
}

pub fn select_product_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id, None);
    q.sql = format!("SELECT id FROM {} WHERE id = {}", PRODUCTS_TABLE, ph);
    q
}

/// Lookup of a sku, optionally ignoring one product id (the one being updated).
pub fn select_id_by_sku(sku: &str, except_id: Option<i64>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sku_ph = q.push_param(sku, None);
    q.sql = match except_id {
        Some(id) => {
            let id_ph = q.push_param(id, None);
            format!("SELECT id FROM {} WHERE sku = {} AND id <> {}", PRODUCTS_TABLE, sku_ph, id_ph)
        }
        None => format!("SELECT id FROM {} WHERE sku = {}", PRODUCTS_TABLE, sku_ph),
    };
    q
}

pub fn select_category_id(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id, None);
    q.sql = format!("SELECT id FROM {} WHERE id = {}", CATEGORIES_TABLE, ph);
    q
}

/// INSERT with every column supplied; returns the stored record.
pub fn insert_product(product: &NewProduct) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = [
        q.push_param(product.nombre.as_str(), None),
        q.push_param(product.descripcion.as_deref(), None),
        q.push_param(product.sku.as_str(), None),
        q.push_param(product.precio, Some("numeric")),
        q.push_param(product.stock, None),
        q.push_param(product.categoria_id, None),
        q.push_param(product.activo, None),
    ];
    q.sql = format!(
        "INSERT INTO {} (nombre, descripcion, sku, precio, stock, categoria_id, activo) VALUES ({}) RETURNING {}",
        PRODUCTS_TABLE,
        placeholders.join(", "),
        PRODUCT_COLUMNS
    );
    q
}

/// UPDATE by id: SET only the columns the patch supplies. Returns `None`
/// when the patch is empty.
pub fn update_product(id: i64, patch: &ProductPatch) -> Option<QueryBuf> {
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    if let Some(nombre) = &patch.nombre {
        sets.push(format!("nombre = {}", q.push_param(nombre.as_str(), None)));
    }
    if let Some(descripcion) = &patch.descripcion {
        sets.push(format!(
            "descripcion = {}",
            q.push_param(descripcion.as_deref(), None)
        ));
    }
    if let Some(sku) = &patch.sku {
        sets.push(format!("sku = {}", q.push_param(sku.as_str(), None)));
    }
    if let Some(precio) = patch.precio {
        sets.push(format!("precio = {}", q.push_param(precio, Some("numeric"))));
    }
    if let Some(stock) = patch.stock {
        sets.push(format!("stock = {}", q.push_param(stock, None)));
    }
    match patch.categoria_id {
        Some(Some(categoria_id)) => {
            sets.push(format!("categoria_id = {}", q.push_param(categoria_id, None)));
        }
        Some(None) => sets.push("categoria_id = NULL".to_string()),
        None => {}
    }
    if let Some(activo) = patch.activo {
        sets.push(format!("activo = {}", q.push_param(activo, None)));
    }
    if sets.is_empty() {
        return None;
    }
    let id_ph = q.push_param(id, None);
    q.sql = format!("UPDATE {} SET {} WHERE id = {}", PRODUCTS_TABLE, sets.join(", "), id_ph);
    Some(q)
}

/// DELETE by id.
pub fn delete_product(id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(id, None);
    q.sql = format!("DELETE FROM {} WHERE id = {}", PRODUCTS_TABLE, ph);
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_joins_categories_newest_first() {
        let q = select_listings();
        assert!(q.sql.contains("LEFT JOIN categorias c ON p.categoria_id = c.id"));
        assert!(q.sql.ends_with("ORDER BY p.id DESC"));
        assert!(q.params.is_empty());
    }

    #[test]
    fn sku_lookup_excludes_current_id() {
        let q = select_id_by_sku("P-1", Some(4));
        assert_eq!(q.sql, "SELECT id FROM productos WHERE sku = $1 AND id <> $2");
        assert_eq!(q.params, vec![PgBindValue::from("P-1"), PgBindValue::from(4_i64)]);

        let q = select_id_by_sku("P-1", None);
        assert_eq!(q.sql, "SELECT id FROM productos WHERE sku = $1");
    }

    #[test]
    fn insert_binds_every_column_in_order() {
        let q = insert_product(&NewProduct {
            nombre: "Pen".into(),
            descripcion: None,
            sku: "P-1".into(),
            precio: 1.5,
            stock: 100,
            categoria_id: None,
            activo: true,
        });
        assert!(q.sql.starts_with(
            "INSERT INTO productos (nombre, descripcion, sku, precio, stock, categoria_id, activo) \
             VALUES ($1, $2, $3, $4::numeric, $5, $6, $7) RETURNING id,"
        ));
        assert_eq!(q.params.len(), 7);
        assert_eq!(q.params[1], PgBindValue::Text(None));
        assert_eq!(q.params[5], PgBindValue::I64(None));
        assert_eq!(q.params[3], PgBindValue::F64(1.5));
        assert_eq!(q.params[6], PgBindValue::Bool(true));
    }

    #[test]
    fn update_sets_only_supplied_columns() {
        let patch = ProductPatch {
            stock: Some(90),
            activo: Some(false),
            ..Default::default()
        };
        let q = update_product(9, &patch).unwrap();
        assert_eq!(q.sql, "UPDATE productos SET stock = $1, activo = $2 WHERE id = $3");
        assert_eq!(
            q.params,
            vec![PgBindValue::from(90_i64), PgBindValue::Bool(false), PgBindValue::from(9_i64)]
        );
    }

    #[test]
    fn update_clears_category_without_a_parameter() {
        let patch = ProductPatch {
            categoria_id: Some(None),
            sku: Some("P-2".into()),
            ..Default::default()
        };
        let q = update_product(1, &patch).unwrap();
        assert_eq!(q.sql, "UPDATE productos SET sku = $1, categoria_id = NULL WHERE id = $2");
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn empty_update_builds_nothing() {
        assert!(update_product(1, &ProductPatch::default()).is_none());
    }

    #[test]
    fn delete_is_by_id() {
        let q = delete_product(3);
        assert_eq!(q.sql, "DELETE FROM productos WHERE id = $1");
        assert_eq!(q.params, vec![PgBindValue::from(3_i64)]);
    }
}
