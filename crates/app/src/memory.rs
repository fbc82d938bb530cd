//! In-memory catalog.
//!
//! Implements every catalog repository over process memory, with the same uniqueness and
//! reference rules the PostgreSQL schema enforces. Products are kept with unresolved relations
//! and populated on read.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dabro::{
    compiler::CompiledQuery,
    pagination::{Page, PageRequest},
    references::Reference,
};
use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{
    domain::{
        categories::{
            CategoriesRepository,
            data::InsertCategory,
            records::{CategoryRecord, CategoryUuid},
        },
        media::{MediaRecord, MediaUuid},
        products::{
            ProductsRepository,
            data::InsertProduct,
            records::{ProductRecord, ProductUuid},
        },
        tags::{
            TagsRepository,
            records::{TagRecord, TagUuid},
        },
        tenants::{
            TenantsRepository,
            data::NewTenant,
            records::{TenantRecord, TenantUuid},
        },
    },
    store::StoreError,
};

#[derive(Debug, Default)]
struct CatalogState {
    media: FxHashMap<MediaUuid, MediaRecord>,
    tenants: FxHashMap<TenantUuid, TenantRecord>,
    categories: FxHashMap<CategoryUuid, CategoryRecord>,
    tags: BTreeMap<String, TagRecord>,
    products: Vec<ProductRecord>,
    clock: Option<Timestamp>,
}

impl CatalogState {
    /// A timestamp strictly later than every one handed out before.
    fn tick(&mut self) -> Timestamp {
        let now = Timestamp::now();

        let next = match self.clock {
            Some(last) if now <= last => last
                .checked_add(SignedDuration::from_nanos(1))
                .unwrap_or(now),
            _ => now,
        };

        self.clock = Some(next);

        next
    }

    fn tenant_by_slug(&self, slug: &str) -> Option<&TenantRecord> {
        self.tenants.values().find(|tenant| tenant.slug == slug)
    }

    fn category_by_slug(&self, slug: &str) -> Option<&CategoryRecord> {
        self.categories
            .values()
            .find(|category| category.slug == slug)
    }

    /// The tags named `names`, created as needed, ordered by name.
    fn sync_tags(&mut self, names: &[String]) -> Vec<TagRecord> {
        let mut seen = FxHashSet::default();

        let mut tags: Vec<TagRecord> = names
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .map(|name| {
                self.tags
                    .entry(name.clone())
                    .or_insert_with(|| TagRecord {
                        uuid: TagUuid::new(),
                        name: name.clone(),
                    })
                    .clone()
            })
            .collect();

        tags.sort_by(|a, b| a.name.cmp(&b.name));

        tags
    }

    /// Replace a stored product's relations with their records.
    fn populate(&self, product: &ProductRecord) -> Result<ProductRecord, StoreError> {
        let tenant = product
            .tenant
            .clone()
            .normalize(|uuid| Ok::<_, StoreError>(self.tenants.get(&uuid).cloned()))?
            .ok_or(StoreError::InvalidReference)?;

        let category = match product.category.clone() {
            Some(reference) => reference
                .normalize(|uuid| Ok::<_, StoreError>(self.categories.get(&uuid).cloned()))?
                .map(Reference::Populated),
            None => None,
        };

        Ok(ProductRecord {
            tenant: Reference::Populated(tenant),
            category,
            ..product.clone()
        })
    }

    fn populated_products(&self) -> Result<Vec<ProductRecord>, StoreError> {
        self.products
            .iter()
            .map(|product| self.populate(product))
            .collect()
    }
}

/// Catalog held in process memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an uploaded image so products can refer to it.
    pub async fn insert_media(&self, media: MediaRecord) {
        self.state.write().await.media.insert(media.uuid, media);
    }
}

#[async_trait]
impl TenantsRepository for MemoryCatalog {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<TenantRecord>, StoreError> {
        Ok(self.state.read().await.tenant_by_slug(slug).cloned())
    }

    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.tenants.contains_key(&tenant.uuid) || state.tenant_by_slug(&tenant.slug).is_some()
        {
            return Err(StoreError::AlreadyExists);
        }

        let now = state.tick();

        let record = TenantRecord {
            uuid: tenant.uuid,
            name: tenant.name,
            slug: tenant.slug,
            image: None,
            stripe_account_id: None,
            stripe_details_submitted: false,
            created_at: now,
            updated_at: now,
        };

        state.tenants.insert(record.uuid, record.clone());

        Ok(record)
    }

    async fn complete_onboarding(
        &self,
        slug: &str,
        stripe_account_id: &str,
    ) -> Result<TenantRecord, StoreError> {
        let mut state = self.state.write().await;

        let uuid = state
            .tenant_by_slug(slug)
            .map(|tenant| tenant.uuid)
            .ok_or(StoreError::NotFound)?;

        let now = state.tick();

        let tenant = state.tenants.get_mut(&uuid).ok_or(StoreError::NotFound)?;

        tenant.stripe_account_id = Some(stripe_account_id.to_owned());
        tenant.stripe_details_submitted = true;
        tenant.updated_at = now;

        Ok(tenant.clone())
    }
}

#[async_trait]
impl CategoriesRepository for MemoryCatalog {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError> {
        Ok(self.state.read().await.category_by_slug(slug).cloned())
    }

    async fn list_children(
        &self,
        parents: &[CategoryUuid],
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        let state = self.state.read().await;

        let mut children: Vec<CategoryRecord> = state
            .categories
            .values()
            .filter(|category| {
                category
                    .parent
                    .is_some_and(|parent| parents.contains(&parent))
            })
            .cloned()
            .collect();

        children.sort_by(|a, b| a.name.cmp(&b.name).then(a.uuid.cmp(&b.uuid)));

        Ok(children)
    }

    async fn list_roots(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        let state = self.state.read().await;

        let mut roots: Vec<CategoryRecord> = state
            .categories
            .values()
            .filter(|category| category.is_root())
            .cloned()
            .collect();

        roots.sort_by(|a, b| a.name.cmp(&b.name).then(a.uuid.cmp(&b.uuid)));

        Ok(roots)
    }

    async fn create_category(
        &self,
        category: InsertCategory,
    ) -> Result<CategoryRecord, StoreError> {
        let mut state = self.state.write().await;

        if state.categories.contains_key(&category.uuid)
            || state.category_by_slug(&category.slug).is_some()
        {
            return Err(StoreError::AlreadyExists);
        }

        if let Some(parent) = category.parent {
            if parent == category.uuid {
                return Err(StoreError::InvalidData);
            }

            if !state.categories.contains_key(&parent) {
                return Err(StoreError::InvalidReference);
            }
        }

        let now = state.tick();

        let record = CategoryRecord {
            uuid: category.uuid,
            name: category.name,
            slug: category.slug,
            color: category.color,
            parent: category.parent,
            created_at: now,
            updated_at: now,
        };

        state.categories.insert(record.uuid, record.clone());

        Ok(record)
    }
}

#[async_trait]
impl TagsRepository for MemoryCatalog {
    async fn list_tags(&self, page: PageRequest) -> Result<Page<TagRecord>, StoreError> {
        let state = self.state.read().await;

        Ok(Page::paginate(
            state.tags.values().cloned().collect::<Vec<_>>(),
            page,
        ))
    }
}

#[async_trait]
impl ProductsRepository for MemoryCatalog {
    async fn find_products(
        &self,
        query: &CompiledQuery,
    ) -> Result<Page<ProductRecord>, StoreError> {
        let state = self.state.read().await;

        let mut matching: Vec<ProductRecord> = state
            .populated_products()?
            .into_iter()
            .filter(|product| query.predicate.matches(product))
            .collect();

        matching.sort_by(|a, b| query.sort.compare(a, b));

        debug!(total_docs = matching.len(), "found products");

        Ok(Page::paginate(matching, query.page))
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, StoreError> {
        let state = self.state.read().await;

        let stored = state
            .products
            .iter()
            .find(|candidate| candidate.uuid == product)
            .ok_or(StoreError::NotFound)?;

        state.populate(stored)
    }

    async fn find_by_uuids(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let state = self.state.read().await;

        state
            .products
            .iter()
            .filter(|product| products.contains(&product.uuid))
            .map(|product| state.populate(product))
            .collect()
    }

    async fn create_product(&self, product: InsertProduct) -> Result<ProductRecord, StoreError> {
        let mut state = self.state.write().await;

        if state
            .products
            .iter()
            .any(|existing| existing.uuid == product.uuid)
        {
            return Err(StoreError::AlreadyExists);
        }

        if product.price < Decimal::ZERO {
            return Err(StoreError::InvalidData);
        }

        if !state.tenants.contains_key(&product.tenant)
            || product
                .category
                .is_some_and(|category| !state.categories.contains_key(&category))
        {
            return Err(StoreError::InvalidReference);
        }

        let image = match product.image {
            Some(uuid) => Some(
                state
                    .media
                    .get(&uuid)
                    .cloned()
                    .ok_or(StoreError::InvalidReference)?,
            ),
            None => None,
        };

        let tags = state.sync_tags(&product.tags);
        let now = state.tick();

        let stored = ProductRecord {
            uuid: product.uuid,
            name: product.name,
            description: product.description,
            price: product.price,
            category: product.category.map(Reference::Unresolved),
            tenant: Reference::Unresolved(product.tenant),
            image,
            tags,
            refund_policy: product.refund_policy,
            content: product.content,
            created_at: now,
            updated_at: now,
        };

        let created = state.populate(&stored)?;

        state.products.push(stored);

        Ok(created)
    }
}
