//! Product Data

use rust_decimal::Decimal;

use crate::domain::{
    categories::records::CategoryUuid,
    media::MediaUuid,
    products::records::{ProductUuid, RefundPolicy},
    tenants::records::TenantUuid,
};

/// Decimal places a stored price keeps.
pub const PRICE_SCALE: u32 = 2;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,

    /// Slug of the selling tenant.
    pub tenant: String,

    /// Category slug.
    pub category: Option<String>,

    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub refund_policy: RefundPolicy,
    pub content: Option<String>,
    pub image: Option<MediaUuid>,

    /// Tag names. Unknown tags are created.
    pub tags: Vec<String>,
}

/// Product row to insert, with its relations resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertProduct {
    pub uuid: ProductUuid,
    pub tenant: TenantUuid,
    pub category: Option<CategoryUuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub refund_policy: RefundPolicy,
    pub content: Option<String>,
    pub image: Option<MediaUuid>,
    pub tags: Vec<String>,
}
