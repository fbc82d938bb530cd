//! Product Responses
//!
//! Listings and lookups share one product shape with its relations resolved. Purchased content is
//! never part of it.

use dabro::{pagination::Page, references::Reference};
use dabro_app::domain::{
    categories::records::CategoryRecord, media::MediaRecord, products::records::ProductRecord,
    tenants::records::TenantRecord,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MediaResponse {
    /// The unique identifier of the image
    pub uuid: Uuid,

    /// Where the image is served from
    pub url: String,

    /// Alternative text
    pub alt: Option<String>,
}

impl From<MediaRecord> for MediaResponse {
    fn from(media: MediaRecord) -> Self {
        Self {
            uuid: media.uuid.into(),
            url: media.url,
            alt: media.alt,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
}

impl From<CategoryRecord> for ProductCategoryResponse {
    fn from(category: CategoryRecord) -> Self {
        Self {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            color: category.color,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductTenantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<MediaResponse>,
}

impl From<TenantRecord> for ProductTenantResponse {
    fn from(tenant: TenantRecord) -> Self {
        Self {
            uuid: tenant.uuid.into(),
            name: tenant.name,
            slug: tenant.slug,
            image: tenant.image.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// The price as a decimal string
    pub price: String,

    /// The product's category, when it has one
    pub category: Option<ProductCategoryResponse>,

    /// The store selling the product
    pub tenant: Option<ProductTenantResponse>,

    pub image: Option<MediaResponse>,

    /// Tag names
    pub tags: Vec<String>,

    /// How long after purchase the product can be refunded
    pub refund_policy: String,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        Self {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            category: product
                .category
                .and_then(Reference::into_populated)
                .map(Into::into),
            tenant: product.tenant.into_populated().map(Into::into),
            image: product.image.map(Into::into),
            tags: product.tags.into_iter().map(|tag| tag.name).collect(),
            refund_policy: product.refund_policy.to_string(),
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductsResponse {
    /// Products on this page
    pub docs: Vec<ProductResponse>,

    /// Number of matching products across all pages
    pub total_docs: u64,

    /// Number of pages the matching products span
    pub total_pages: u64,

    /// This page's number, starting at 1
    pub page: u32,

    pub has_next_page: bool,

    pub has_prev_page: bool,

    /// Cursor of the next page, while one exists
    pub next_cursor: Option<u32>,
}

impl From<Page<ProductRecord>> for ProductsResponse {
    fn from(page: Page<ProductRecord>) -> Self {
        let next_cursor = page.next_cursor();
        let page = page.map(ProductResponse::from);

        Self {
            docs: page.docs,
            total_docs: page.total_docs,
            total_pages: page.total_pages,
            page: page.page,
            has_next_page: page.has_next_page,
            has_prev_page: page.has_prev_page,
            next_cursor,
        }
    }
}
