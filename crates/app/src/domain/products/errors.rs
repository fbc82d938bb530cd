//! Products service errors.

use thiserror::Error;

use crate::{
    domain::{categories::CategoriesServiceError, tenants::TenantsServiceError},
    store::StoreError,
};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("price must not be negative")]
    NegativePrice,

    #[error("price must have at most two decimal places")]
    PriceTooPrecise,

    #[error("product name must not be empty")]
    EmptyName,

    #[error("tenant not found")]
    TenantNotFound,

    #[error("tenant has not completed payment onboarding")]
    TenantNotOnboarded,

    #[error("category not found")]
    CategoryNotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("category lookup failed")]
    Categories(#[source] CategoriesServiceError),

    #[error("tenant lookup failed")]
    Tenants(#[source] TenantsServiceError),

    #[error("storage error")]
    Store(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AlreadyExists => Self::AlreadyExists,
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidReference => Self::InvalidReference,
            StoreError::MissingRequiredData | StoreError::InvalidData => Self::InvalidData,
            StoreError::Sql(_) => Self::Store(error),
        }
    }
}

impl From<CategoriesServiceError> for ProductsServiceError {
    fn from(error: CategoriesServiceError) -> Self {
        Self::Categories(error)
    }
}

impl From<TenantsServiceError> for ProductsServiceError {
    fn from(error: TenantsServiceError) -> Self {
        match error {
            TenantsServiceError::NotFound => Self::TenantNotFound,
            other => Self::Tenants(other),
        }
    }
}
