//! Products

pub mod data;
pub mod errors;
mod query;
pub mod records;
mod repository;
pub mod service;

pub use errors::ProductsServiceError;
pub use repository::{MockProductsRepository, PgProductsRepository, ProductsRepository};
pub use service::*;
