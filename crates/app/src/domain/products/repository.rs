//! Products Repository

use async_trait::async_trait;
use dabro::{compiler::CompiledQuery, pagination::Page, references::Reference};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Row, Transaction, postgres::PgRow};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::{
        categories::records::CategoryRecord,
        media::MediaRecord,
        products::{
            data::InsertProduct,
            query,
            records::{ProductRecord, ProductUuid, RefundPolicy},
        },
        tags::PgTagsRepository,
        tenants::records::TenantRecord,
    },
    store::StoreError,
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

#[automock]
#[async_trait]
pub trait ProductsRepository: Send + Sync {
    /// One page of the products matching a compiled listing query.
    async fn find_products(
        &self,
        query: &CompiledQuery,
    ) -> Result<Page<ProductRecord>, StoreError>;

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, StoreError>;

    /// Every product among `products` that exists.
    async fn find_by_uuids(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, StoreError>;

    async fn create_product(&self, product: InsertProduct) -> Result<ProductRecord, StoreError>;
}

/// PostgreSQL-backed products repository.
#[derive(Debug, Clone)]
pub struct PgProductsRepository {
    pool: PgPool,
    tags: PgTagsRepository,
}

impl PgProductsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            tags: PgTagsRepository::new(pool.clone()),
            pool,
        }
    }

    async fn select_by_uuids(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        let mut products = query::select_by_uuids(products)
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut **tx)
            .await?;

        self.attach_tags(tx, &mut products).await?;

        Ok(products)
    }

    async fn attach_tags(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [ProductRecord],
    ) -> Result<(), sqlx::Error> {
        let uuids: Vec<ProductUuid> = products.iter().map(|product| product.uuid).collect();

        let mut tags = self.tags.list_taggable_tags(tx, &uuids).await?;

        for product in products {
            product.tags = tags.remove(&product.uuid).unwrap_or_default();
        }

        Ok(())
    }
}

#[async_trait]
impl ProductsRepository for PgProductsRepository {
    #[tracing::instrument(
        name = "products.repository.find_products",
        skip(self, query),
        fields(
            condition_count = query.predicate.conditions().len(),
            page = query.page.page(),
            limit = query.page.limit(),
            total_docs = tracing::field::Empty
        ),
        err
    )]
    async fn find_products(
        &self,
        query: &CompiledQuery,
    ) -> Result<Page<ProductRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let total: i64 = query::count(&query.predicate)
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await?;

        let mut products = query::select_page(query)
            .build_query_as::<ProductRecord>()
            .fetch_all(&mut *tx)
            .await?;

        self.attach_tags(&mut tx, &mut products).await?;

        tx.commit().await?;

        let total_docs = u64::try_from(total).unwrap_or_default();

        tracing::Span::current().record("total_docs", total_docs);

        debug!(returned = products.len(), total_docs, "found products");

        Ok(Page::new(products, total_docs, query.page))
    }

    #[tracing::instrument(name = "products.repository.get_product", skip(self), err)]
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        let product = self
            .select_by_uuids(&mut tx, &[product])
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.repository.find_by_uuids",
        skip(self, products),
        fields(requested = products.len()),
        err
    )]
    async fn find_by_uuids(
        &self,
        products: &[ProductUuid],
    ) -> Result<Vec<ProductRecord>, StoreError> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;

        let found = self.select_by_uuids(&mut tx, products).await?;

        tx.commit().await?;

        Ok(found)
    }

    #[tracing::instrument(
        name = "products.repository.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, tenant_uuid = %product.tenant),
        err
    )]
    async fn create_product(&self, product: InsertProduct) -> Result<ProductRecord, StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.tenant.into_uuid())
            .bind(product.category.map(Into::<Uuid>::into))
            .bind(product.image.map(Into::<Uuid>::into))
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.refund_policy.as_str())
            .bind(&product.content)
            .execute(&mut *tx)
            .await?;

        self.tags.tag(&mut tx, product.uuid, &product.tags).await?;

        let created = self
            .select_by_uuids(&mut tx, &[product.uuid])
            .await?
            .into_iter()
            .next()
            .ok_or(StoreError::NotFound)?;

        tx.commit().await?;

        Ok(created)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let refund_policy = row
            .try_get::<String, _>("refund_policy")?
            .parse::<RefundPolicy>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "refund_policy".to_string(),
                source: Box::new(e),
            })?;

        let tenant = TenantRecord::from_prefixed_row(row, "tenant_")?
            .ok_or_else(|| sqlx::Error::ColumnNotFound("tenant_uuid".into()))?;

        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get::<Decimal, _>("price")?,
            category: CategoryRecord::from_prefixed_row(row, "category_")?
                .map(Reference::Populated),
            tenant: Reference::Populated(tenant),
            image: MediaRecord::from_prefixed_row(row, "image_")?,
            tags: Vec::new(),
            refund_policy,
            content: row.try_get("content")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
