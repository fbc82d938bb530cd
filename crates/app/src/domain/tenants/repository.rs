//! Tenants Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    domain::{
        media::MediaRecord,
        tenants::{
            data::NewTenant,
            records::{TenantRecord, TenantUuid},
        },
    },
    store::StoreError,
};

const FIND_TENANT_BY_SLUG_SQL: &str = include_str!("sql/find_tenant_by_slug.sql");
const CREATE_TENANT_SQL: &str = include_str!("sql/create_tenant.sql");
const COMPLETE_ONBOARDING_SQL: &str = include_str!("sql/complete_onboarding.sql");

#[automock]
#[async_trait]
pub trait TenantsRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<TenantRecord>, StoreError>;

    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, StoreError>;

    /// Record the payment account and mark onboarding complete.
    async fn complete_onboarding(
        &self,
        slug: &str,
        stripe_account_id: &str,
    ) -> Result<TenantRecord, StoreError>;
}

/// PostgreSQL-backed tenants repository.
#[derive(Debug, Clone)]
pub struct PgTenantsRepository {
    pool: PgPool,
}

impl PgTenantsRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantsRepository for PgTenantsRepository {
    #[tracing::instrument(name = "tenants.repository.find_by_slug", skip(self), err)]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<TenantRecord>, StoreError> {
        Ok(query_as::<Postgres, TenantRecord>(FIND_TENANT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?)
    }

    #[tracing::instrument(
        name = "tenants.repository.create_tenant",
        skip(self, tenant),
        fields(tenant_uuid = %tenant.uuid, slug = %tenant.slug),
        err
    )]
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, StoreError> {
        Ok(query_as::<Postgres, TenantRecord>(CREATE_TENANT_SQL)
            .bind(tenant.uuid.into_uuid())
            .bind(tenant.name)
            .bind(tenant.slug)
            .fetch_one(&self.pool)
            .await?)
    }

    #[tracing::instrument(
        name = "tenants.repository.complete_onboarding",
        skip(self, stripe_account_id),
        err
    )]
    async fn complete_onboarding(
        &self,
        slug: &str,
        stripe_account_id: &str,
    ) -> Result<TenantRecord, StoreError> {
        Ok(query_as::<Postgres, TenantRecord>(COMPLETE_ONBOARDING_SQL)
            .bind(slug)
            .bind(stripe_account_id)
            .fetch_one(&self.pool)
            .await?)
    }
}

impl TenantRecord {
    /// Decode a tenant joined into `row` under `prefix`. Absent when the join found nothing.
    pub(crate) fn from_prefixed_row(row: &PgRow, prefix: &str) -> sqlx::Result<Option<Self>> {
        let column = |name: &str| format!("{prefix}{name}");

        let Some(uuid) = row.try_get::<Option<Uuid>, _>(column("uuid").as_str())? else {
            return Ok(None);
        };

        Ok(Some(Self {
            uuid: TenantUuid::from_uuid(uuid),
            name: row.try_get(column("name").as_str())?,
            slug: row.try_get(column("slug").as_str())?,
            image: MediaRecord::from_prefixed_row(row, &column("image_"))?,
            stripe_account_id: row.try_get(column("stripe_account_id").as_str())?,
            stripe_details_submitted: row.try_get(column("stripe_details_submitted").as_str())?,
            created_at: row
                .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
                .to_jiff(),
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for TenantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Self::from_prefixed_row(row, "")?.ok_or_else(|| sqlx::Error::ColumnNotFound("uuid".into()))
    }
}
