//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use dabro::pricing::total_price;
use mockall::automock;
use rustc_hash::FxHashSet;

use crate::domain::{
    checkout::{errors::CheckoutServiceError, records::CheckoutSummary},
    products::{ProductsRepository, records::ProductUuid},
};

#[derive(Clone)]
pub struct StoreCheckoutService {
    products: Arc<dyn ProductsRepository>,
}

impl StoreCheckoutService {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsRepository>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CheckoutService for StoreCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.get_products",
        skip(self, products),
        fields(requested = products.len()),
        err
    )]
    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<CheckoutSummary, CheckoutServiceError> {
        let mut seen = FxHashSet::default();
        let requested: Vec<ProductUuid> = products
            .into_iter()
            .filter(|product| seen.insert(*product))
            .collect();

        let found = self.products.find_by_uuids(&requested).await?;

        if found.len() != requested.len() {
            return Err(CheckoutServiceError::ProductsNotFound {
                missing: requested.len().saturating_sub(found.len()),
            });
        }

        let total_price = total_price(found.iter().map(|product| product.price))?;

        Ok(CheckoutSummary {
            products: found,
            total_price,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// The products in a cart with their total price. Fails unless every product exists.
    async fn get_products(
        &self,
        products: Vec<ProductUuid>,
    ) -> Result<CheckoutSummary, CheckoutServiceError>;
}
