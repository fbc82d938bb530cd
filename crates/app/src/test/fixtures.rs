//! Test fixtures.

use rust_decimal::Decimal;

use crate::domain::{
    categories::{data::NewCategory, records::CategoryUuid},
    products::{
        data::NewProduct,
        records::{ProductUuid, RefundPolicy},
    },
    tenants::{data::NewTenant, records::TenantUuid},
};

pub(crate) fn new_tenant(slug: &str) -> NewTenant {
    NewTenant {
        uuid: TenantUuid::new(),
        name: format!("{slug} store"),
        slug: slug.to_string(),
    }
}

/// A category named after its slug.
pub(crate) fn new_category(slug: &str, parent: Option<&str>) -> NewCategory {
    NewCategory {
        uuid: CategoryUuid::new(),
        name: slug.to_string(),
        slug: slug.to_string(),
        color: None,
        parent: parent.map(str::to_string),
    }
}

/// An uncategorized, untagged product.
pub(crate) fn new_product(tenant: &str, name: &str, price: i64) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        tenant: tenant.to_string(),
        category: None,
        name: name.to_string(),
        description: None,
        price: Decimal::from(price),
        refund_policy: RefundPolicy::default(),
        content: None,
        image: None,
        tags: Vec::new(),
    }
}
