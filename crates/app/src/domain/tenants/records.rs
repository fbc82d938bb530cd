//! Tenant Records

use jiff::Timestamp;

use crate::{domain::media::MediaRecord, uuids::TypedUuid};

/// Tenant UUID
pub type TenantUuid = TypedUuid<TenantRecord>;

/// Tenant Record
#[derive(Debug, Clone, PartialEq)]
pub struct TenantRecord {
    /// Unique tenant identifier.
    pub uuid: TenantUuid,

    /// Store name.
    pub name: String,

    /// Unique storefront slug.
    pub slug: String,

    /// Store logo.
    pub image: Option<MediaRecord>,

    /// Connected payment account.
    pub stripe_account_id: Option<String>,

    /// Whether payment onboarding is complete. Products can only be created once it is.
    pub stripe_details_submitted: bool,

    /// Tenant creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}
