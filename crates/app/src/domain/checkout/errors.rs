//! Checkout service errors.

use dabro::pricing::TotalPriceError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CheckoutServiceError {
    #[error("{missing} of the requested products were not found")]
    ProductsNotFound { missing: usize },

    #[error("could not total product prices")]
    Total(#[from] TotalPriceError),

    #[error("storage error")]
    Store(#[from] StoreError),
}
