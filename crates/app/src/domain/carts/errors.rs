//! Cart errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartStorageError {
    #[error("cart storage is unavailable")]
    Unavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum CartsError {
    #[error("persisted carts are malformed")]
    Malformed(#[from] serde_json::Error),

    #[error("cart storage failed")]
    Storage(#[from] CartStorageError),
}
