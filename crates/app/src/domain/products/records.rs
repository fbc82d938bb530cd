//! Product Records

use std::{fmt, str::FromStr};

use dabro::{predicate::Filterable, references::Reference};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        categories::records::{CategoryRecord, CategoryUuid},
        media::MediaRecord,
        tags::{Taggable, records::TagRecord},
        tenants::records::{TenantRecord, TenantUuid},
    },
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// How long after purchase a product can be refunded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundPolicy {
    #[default]
    #[serde(rename = "30-day")]
    ThirtyDays,
    #[serde(rename = "14-day")]
    FourteenDays,
    #[serde(rename = "7-day")]
    SevenDays,
    #[serde(rename = "3-day")]
    ThreeDays,
    #[serde(rename = "1-day")]
    OneDay,
    #[serde(rename = "no-refunds")]
    NoRefunds,
}

impl RefundPolicy {
    pub const ALL: [Self; 6] = [
        Self::ThirtyDays,
        Self::FourteenDays,
        Self::SevenDays,
        Self::ThreeDays,
        Self::OneDay,
        Self::NoRefunds,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirtyDays => "30-day",
            Self::FourteenDays => "14-day",
            Self::SevenDays => "7-day",
            Self::ThreeDays => "3-day",
            Self::OneDay => "1-day",
            Self::NoRefunds => "no-refunds",
        }
    }
}

impl fmt::Display for RefundPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown refund policy '{0}'")]
pub struct RefundPolicyError(String);

impl FromStr for RefundPolicy {
    type Err = RefundPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or_else(|| RefundPolicyError(s.to_owned()))
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<Reference<CategoryRecord, CategoryUuid>>,
    pub tenant: Reference<TenantRecord, TenantUuid>,
    pub image: Option<MediaRecord>,
    pub tags: Vec<TagRecord>,
    pub refund_policy: RefundPolicy,

    /// Delivered to buyers after purchase. Never part of listings.
    pub content: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Taggable for ProductRecord {
    fn type_as_str() -> &'static str {
        "product"
    }
}

impl Filterable for ProductRecord {
    type Id = ProductUuid;

    fn id(&self) -> ProductUuid {
        self.uuid
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Decimal {
        self.price
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn category_slug(&self) -> Option<&str> {
        self.category
            .as_ref()
            .and_then(Reference::populated)
            .map(|category| category.slug.as_str())
    }

    fn tenant_slug(&self) -> Option<&str> {
        self.tenant.populated().map(|tenant| tenant.slug.as_str())
    }

    fn has_tag_named(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}
