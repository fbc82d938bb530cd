//! Tenants service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::domain::tenants::{
    TenantsRepository, data::NewTenant, errors::TenantsServiceError, records::TenantRecord,
};

#[derive(Clone)]
pub struct StoreTenantsService {
    repository: Arc<dyn TenantsRepository>,
}

impl StoreTenantsService {
    #[must_use]
    pub fn new(repository: Arc<dyn TenantsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TenantsService for StoreTenantsService {
    async fn get_tenant(&self, slug: &str) -> Result<TenantRecord, TenantsServiceError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or(TenantsServiceError::NotFound)
    }

    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError> {
        if tenant.slug.trim().is_empty() {
            return Err(TenantsServiceError::EmptySlug);
        }

        let created = self.repository.create_tenant(tenant).await?;

        info!(tenant_uuid = %created.uuid, slug = %created.slug, "created tenant");

        Ok(created)
    }

    async fn complete_onboarding(
        &self,
        slug: &str,
        stripe_account_id: &str,
    ) -> Result<TenantRecord, TenantsServiceError> {
        let tenant = self
            .repository
            .complete_onboarding(slug, stripe_account_id)
            .await?;

        info!(tenant_uuid = %tenant.uuid, slug, "completed tenant onboarding");

        Ok(tenant)
    }
}

#[automock]
#[async_trait]
/// Tenant operations.
pub trait TenantsService: Send + Sync {
    /// Retrieve a tenant by storefront slug.
    async fn get_tenant(&self, slug: &str) -> Result<TenantRecord, TenantsServiceError>;

    /// Creates a new tenant.
    async fn create_tenant(&self, tenant: NewTenant) -> Result<TenantRecord, TenantsServiceError>;

    /// Marks a tenant's payment onboarding as complete.
    async fn complete_onboarding(
        &self,
        slug: &str,
        stripe_account_id: &str,
    ) -> Result<TenantRecord, TenantsServiceError>;
}
