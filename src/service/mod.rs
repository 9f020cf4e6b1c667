//! ProductService: product operations over a `ProductStore`.

mod products;
mod validation;
pub use products::ProductService;
pub use validation::{CreateProductRequest, RequestValidator, UpdateProductRequest};
