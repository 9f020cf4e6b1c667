//! Request bodies for create and update, and their validation into store inputs.
//!
//! `precio`, `stock` and `categoria_id` accept JSON numbers or numeric
//! strings; `activo` accepts booleans or 0/1. An explicit `null` on a
//! nullable column (`descripcion`, `categoria_id`) in an update clears it.

use crate::error::{AppError, MISSING_FIELDS, PRECIO_OUT_OF_RANGE};
use crate::model::{NewProduct, ProductPatch};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct CreateProductRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "numeric_f64")]
    pub precio: Option<f64>,
    #[serde(default, deserialize_with = "numeric_i64")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "numeric_i64")]
    pub categoria_id: Option<i64>,
    #[serde(default, deserialize_with = "flag")]
    pub activo: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub descripcion: Option<Option<String>>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "numeric_f64")]
    pub precio: Option<f64>,
    #[serde(default, deserialize_with = "numeric_i64")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "nullable_numeric_i64")]
    pub categoria_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "flag")]
    pub activo: Option<bool>,
}

/// Largest magnitude a `NUMERIC(12, 2)` column stores after rounding.
pub const MAX_PRECIO: f64 = 9_999_999_999.99;

pub struct RequestValidator;

fn check_precio(precio: f64) -> Result<f64, AppError> {
    if precio.abs() > MAX_PRECIO {
        return Err(AppError::Validation(PRECIO_OUT_OF_RANGE.into()));
    }
    Ok(precio)
}

impl RequestValidator {
    /// Required: nombre and sku (non-empty), precio and stock.
    pub fn validate(req: CreateProductRequest) -> Result<NewProduct, AppError> {
        let missing = || AppError::Validation(MISSING_FIELDS.into());
        let nombre = req.nombre.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let sku = req.sku.filter(|s| !s.is_empty()).ok_or_else(missing)?;
        let precio = req.precio.ok_or_else(missing)?;
        let stock = req.stock.ok_or_else(missing)?;
        let precio = check_precio(precio)?;
        Ok(NewProduct {
            nombre,
            descripcion: req.descripcion,
            sku,
            precio,
            stock,
            categoria_id: req.categoria_id,
            activo: req.activo.unwrap_or(true),
        })
    }

    /// Every field is optional; the result may be empty.
    pub fn validate_partial(req: UpdateProductRequest) -> Result<ProductPatch, AppError> {
        Ok(ProductPatch {
            nombre: req.nombre,
            descripcion: req.descripcion,
            sku: req.sku,
            precio: req.precio.map(check_precio).transpose()?,
            stock: req.stock,
            categoria_id: req.categoria_id,
            activo: req.activo,
        })
    }
}

fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn coerce_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn numeric_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        v => coerce_f64(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", v))),
    }
}

fn numeric_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        v => coerce_i64(&v)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected an integer, got {}", v))),
    }
}

fn nullable_numeric_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<i64>>, D::Error> {
    numeric_i64(d).map(Some)
}

fn nullable<'de, D, T>(d: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Some)
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::Number(n) => Ok(Some(n.as_f64() != Some(0.0))),
        Value::String(s) => match s.trim() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("expected a boolean, got \"{}\"", other))),
        },
        other => Err(D::Error::custom(format!("expected a boolean, got {}", other))),
    }
}
