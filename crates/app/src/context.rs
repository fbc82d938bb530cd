//! App Context

use std::sync::Arc;

use dabro::{categories::UnknownCategoryPolicy, compiler::QueryCompiler};
use sqlx::{PgPool, migrate::MigrateError};
use thiserror::Error;

use crate::{
    database,
    domain::{
        categories::{
            CategoriesRepository, CategoriesService, PgCategoriesRepository,
            StoreCategoriesService,
        },
        checkout::{CheckoutService, StoreCheckoutService},
        products::{PgProductsRepository, ProductsRepository, ProductsService, StoreProductsService},
        tags::{PgTagsRepository, StoreTagsService, TagsRepository, TagsService},
        tenants::{PgTenantsRepository, StoreTenantsService, TenantsRepository, TenantsService},
    },
    memory::MemoryCatalog,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub categories: Arc<dyn CategoriesService>,
    pub tenants: Arc<dyn TenantsService>,
    pub tags: Arc<dyn TagsService>,
    pub checkout: Arc<dyn CheckoutService>,
}

impl AppContext {
    /// Build application context from a database URL, applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to or migrating the database fails.
    pub async fn from_database_url(
        url: &str,
        policy: UnknownCategoryPolicy,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_pool(pool, policy))
    }

    #[must_use]
    pub fn from_pool(pool: PgPool, policy: UnknownCategoryPolicy) -> Self {
        Self::from_repositories(
            Arc::new(PgProductsRepository::new(pool.clone())),
            Arc::new(PgCategoriesRepository::new(pool.clone())),
            Arc::new(PgTenantsRepository::new(pool.clone())),
            Arc::new(PgTagsRepository::new(pool)),
            policy,
        )
    }

    /// Build application context over an in-process catalog.
    #[must_use]
    pub fn in_memory(catalog: Arc<MemoryCatalog>, policy: UnknownCategoryPolicy) -> Self {
        Self::from_repositories(
            catalog.clone(),
            catalog.clone(),
            catalog.clone(),
            catalog,
            policy,
        )
    }

    fn from_repositories(
        products: Arc<dyn ProductsRepository>,
        categories: Arc<dyn CategoriesRepository>,
        tenants: Arc<dyn TenantsRepository>,
        tags: Arc<dyn TagsRepository>,
        policy: UnknownCategoryPolicy,
    ) -> Self {
        let categories: Arc<dyn CategoriesService> =
            Arc::new(StoreCategoriesService::new(categories));
        let tenants: Arc<dyn TenantsService> = Arc::new(StoreTenantsService::new(tenants));

        Self {
            products: Arc::new(StoreProductsService::new(
                products.clone(),
                categories.clone(),
                tenants.clone(),
                QueryCompiler::new(policy),
            )),
            checkout: Arc::new(StoreCheckoutService::new(products)),
            tags: Arc::new(StoreTagsService::new(tags)),
            categories,
            tenants,
        }
    }
}
