//! Tags service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum TagsServiceError {
    #[error("storage error")]
    Store(#[from] StoreError),
}
