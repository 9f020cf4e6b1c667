//! Product CRUD routes under `/api/productos`. Paths also match with a
//! trailing slash, and a wrong method gets the JSON 404.

use super::common::not_found;
use crate::handlers::products::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn product_routes(state: AppState) -> Router {
    let collection = get(list).post(create).fallback(not_found);
    let item = get(read).put(update).delete(delete_handler).fallback(not_found);
    Router::new()
        .route("/api/productos", collection.clone())
        .route("/api/productos/", collection)
        .route("/api/productos/:id", item.clone())
        .route("/api/productos/:id/", item)
        .with_state(state)
}
