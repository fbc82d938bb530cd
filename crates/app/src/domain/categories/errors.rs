//! Categories service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CategoriesServiceError {
    #[error("category already exists")]
    AlreadyExists,

    #[error("category not found")]
    NotFound,

    #[error("category slug must not be empty")]
    EmptySlug,

    #[error("parent category not found")]
    ParentNotFound,

    #[error("subcategories cannot have subcategories")]
    NestingTooDeep,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for CategoriesServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::InvalidReference => Self::ParentNotFound,
            StoreError::MissingRequiredData | StoreError::InvalidData => Self::InvalidData,
            StoreError::NotFound => Self::NotFound,
            StoreError::Sql(_) => Self::Store(error),
        }
    }
}
