//! Tenant carts.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::{
    carts::{
        errors::CartsError,
        records::{CART_STATE_VERSION, CartState, PersistedCarts, TenantCart},
        storage::CartStorage,
    },
    products::records::ProductUuid,
};

/// Key the carts are persisted under.
pub const CART_STORAGE_KEY: &str = "dabro-cart";

/// Every tenant's cart, written through to storage after each change.
#[derive(Debug)]
pub struct TenantCarts<S> {
    storage: S,
    carts: BTreeMap<String, TenantCart>,
}

impl<S: CartStorage> TenantCarts<S> {
    /// Restore carts from `storage`, starting empty when nothing was persisted.
    ///
    /// # Errors
    ///
    /// Returns an error when storage can't be read or holds malformed carts.
    pub fn load(storage: S) -> Result<Self, CartsError> {
        let carts = match storage.read(CART_STORAGE_KEY)? {
            Some(raw) => serde_json::from_str::<PersistedCarts>(&raw)?.state.tenant_carts,
            None => BTreeMap::new(),
        };

        debug!(tenants = carts.len(), "loaded carts");

        Ok(Self { storage, carts })
    }

    /// Products in a tenant's cart, in the order they were added.
    #[must_use]
    pub fn product_ids(&self, tenant: &str) -> &[ProductUuid] {
        self.carts
            .get(tenant)
            .map_or(&[], |cart| cart.product_ids.as_slice())
    }

    #[must_use]
    pub fn contains(&self, tenant: &str, product: ProductUuid) -> bool {
        self.product_ids(tenant).contains(&product)
    }

    #[must_use]
    pub fn total_items(&self, tenant: &str) -> usize {
        self.product_ids(tenant).len()
    }

    /// Tenants with a cart, including emptied ones.
    pub fn tenants(&self) -> impl Iterator<Item = &str> {
        self.carts.keys().map(String::as_str)
    }

    /// Add a product to a tenant's cart. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns an error when the carts can't be persisted.
    pub fn add_product(&mut self, tenant: &str, product: ProductUuid) -> Result<bool, CartsError> {
        if self.contains(tenant, product) {
            return Ok(false);
        }

        let mut carts = self.carts.clone();

        carts
            .entry(tenant.to_owned())
            .or_default()
            .product_ids
            .push(product);

        self.commit(carts)?;

        Ok(true)
    }

    /// Remove a product from a tenant's cart. Returns `false` if it wasn't there.
    ///
    /// # Errors
    ///
    /// Returns an error when the carts can't be persisted.
    pub fn remove_product(
        &mut self,
        tenant: &str,
        product: ProductUuid,
    ) -> Result<bool, CartsError> {
        if !self.contains(tenant, product) {
            return Ok(false);
        }

        let mut carts = self.carts.clone();

        if let Some(cart) = carts.get_mut(tenant) {
            cart.product_ids.retain(|id| *id != product);
        }

        self.commit(carts)?;

        Ok(true)
    }

    /// Add the product if absent, remove it if present. Returns whether it's now in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the carts can't be persisted.
    pub fn toggle_product(
        &mut self,
        tenant: &str,
        product: ProductUuid,
    ) -> Result<bool, CartsError> {
        if self.contains(tenant, product) {
            self.remove_product(tenant, product)?;

            Ok(false)
        } else {
            self.add_product(tenant, product)
        }
    }

    /// Empty a tenant's cart. The tenant keeps an (empty) cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the carts can't be persisted.
    pub fn clear_cart(&mut self, tenant: &str) -> Result<(), CartsError> {
        let mut carts = self.carts.clone();

        carts
            .entry(tenant.to_owned())
            .or_default()
            .product_ids
            .clear();

        self.commit(carts)
    }

    /// Drop every cart and the persisted state.
    ///
    /// # Errors
    ///
    /// Returns an error when storage can't be cleared.
    pub fn clear_all_carts(&mut self) -> Result<(), CartsError> {
        self.storage.clear(CART_STORAGE_KEY)?;
        self.carts.clear();

        Ok(())
    }

    /// Persist `carts`, then make them current. A failed write leaves the current carts untouched.
    fn commit(&mut self, carts: BTreeMap<String, TenantCart>) -> Result<(), CartsError> {
        let persisted = PersistedCarts {
            state: CartState {
                tenant_carts: carts,
            },
            version: CART_STATE_VERSION,
        };

        self.storage
            .write(CART_STORAGE_KEY, &serde_json::to_string(&persisted)?)?;

        self.carts = persisted.state.tenant_carts;

        Ok(())
    }
}
