//! Product CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::response::Ack;
use crate::service::{CreateProductRequest, ProductService, RequestValidator, UpdateProductRequest};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// A path id that is not an integer cannot name a row.
fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.trim().parse().map_err(|_| AppError::not_found())
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = ProductService::list(state.store.as_ref()).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = ProductService::get(state.store.as_ref(), id).await?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let product = RequestValidator::validate(body)?;
    let created = ProductService::create(state.store.as_ref(), product).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = body?;
    let patch = RequestValidator::validate_partial(body)?;
    ProductService::update(state.store.as_ref(), id, patch).await?;
    Ok(Json(Ack::ok()))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    ProductService::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
