//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    InvalidVar { var: &'static str, value: String },
    #[error("invalid DATABASE_URL: {0}")]
    DatabaseUrl(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    /// Failure that already knows which status it should produce.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

pub const NOT_FOUND: &str = "Not found";
pub const ROUTE_NOT_FOUND: &str = "Resource not found";
pub const MISSING_FIELDS: &str = "Required fields: nombre, sku, precio, stock";
pub const SKU_TAKEN: &str = "SKU already registered";
pub const SKU_TAKEN_BY_OTHER: &str = "SKU already registered by another product";
pub const INVALID_CATEGORY: &str = "Invalid categoria_id";
pub const NOTHING_TO_UPDATE: &str = "Nothing to update";
pub const PRECIO_OUT_OF_RANGE: &str = "precio out of range";
const INTERNAL: &str = "Internal error";

impl AppError {
    pub fn not_found() -> Self {
        AppError::NotFound(NOT_FOUND.into())
    }

    pub fn invalid_category() -> Self {
        AppError::Validation(INVALID_CATEGORY.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Status { status, .. } => *status,
            AppError::Config(_) | AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
                AppError::Validation(rejection.body_text())
            }
            other => AppError::Status {
                status: other.status(),
                message: other.body_text(),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Config(_) | AppError::Db(_) => {
                tracing::error!(error = %self, "request failed");
                INTERNAL.to_string()
            }
            _ => self.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
