//! Tenant Data

use crate::domain::tenants::records::TenantUuid;

/// New Tenant Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTenant {
    /// UUID to assign to the tenant row.
    pub uuid: TenantUuid,

    /// Store name shown to shoppers.
    pub name: String,

    /// Unique storefront slug.
    pub slug: String,
}
