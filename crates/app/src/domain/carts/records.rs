//! Cart Records
//!
//! The persisted shape: `{"state": {"tenantCarts": {"<slug>": {"productIds": [...]}}}, "version": 0}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::products::records::ProductUuid;

/// Version of the persisted cart format.
pub const CART_STATE_VERSION: u32 = 0;

/// One tenant's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCart {
    /// Products in the order they were added. Each appears once.
    pub product_ids: Vec<ProductUuid>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartState {
    pub(crate) tenant_carts: BTreeMap<String, TenantCart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PersistedCarts {
    pub(crate) state: CartState,
    pub(crate) version: u32,
}
