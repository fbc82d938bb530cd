//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use dabro::{
    categories::CategoryScope, compiler::QueryCompiler, filters::FilterParams, pagination::Page,
};
use mockall::automock;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::{
    categories::{CategoriesService, CategoriesServiceError},
    products::{
        ProductsRepository,
        data::{InsertProduct, NewProduct, PRICE_SCALE},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid},
    },
    tenants::TenantsService,
};

#[derive(Clone)]
pub struct StoreProductsService {
    repository: Arc<dyn ProductsRepository>,
    categories: Arc<dyn CategoriesService>,
    tenants: Arc<dyn TenantsService>,
    compiler: QueryCompiler,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(
        repository: Arc<dyn ProductsRepository>,
        categories: Arc<dyn CategoriesService>,
        tenants: Arc<dyn TenantsService>,
        compiler: QueryCompiler,
    ) -> Self {
        Self {
            repository,
            categories,
            tenants,
            compiler,
        }
    }
}

#[async_trait]
impl ProductsService for StoreProductsService {
    #[tracing::instrument(
        name = "products.service.list_products",
        skip(self, params),
        fields(
            category = params.category(),
            sort = params.sort.map(|sort| sort.as_str()),
            unknown_category = tracing::field::Empty
        ),
        err
    )]
    async fn list_products(
        &self,
        params: FilterParams,
    ) -> Result<Page<ProductRecord>, ProductsServiceError> {
        let scope = match params.category() {
            Some(slug) => Some(self.categories.resolve_category_scope(slug).await?),
            None => None,
        };

        if scope.as_ref().is_some_and(CategoryScope::is_empty) {
            tracing::Span::current().record("unknown_category", true);

            debug!(policy = %self.compiler.policy(), "category not found");
        }

        let query = self.compiler.compile(&params, scope);

        Ok(self.repository.find_products(&query).await?)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        Ok(self.repository.get_product(product).await?)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(product_uuid = %product.uuid, tenant = %product.tenant),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        if product.price < Decimal::ZERO {
            return Err(ProductsServiceError::NegativePrice);
        }

        if product.price.normalize().scale() > PRICE_SCALE {
            return Err(ProductsServiceError::PriceTooPrecise);
        }

        if product.name.trim().is_empty() {
            return Err(ProductsServiceError::EmptyName);
        }

        let tenant = self.tenants.get_tenant(&product.tenant).await?;

        if !tenant.stripe_details_submitted {
            return Err(ProductsServiceError::TenantNotOnboarded);
        }

        let category = match product.category.as_deref() {
            Some(slug) => Some(
                self.categories
                    .get_category(slug)
                    .await
                    .map_err(|error| match error {
                        CategoriesServiceError::NotFound => ProductsServiceError::CategoryNotFound,
                        other => ProductsServiceError::Categories(other),
                    })?
                    .uuid,
            ),
            None => None,
        };

        let created = self
            .repository
            .create_product(InsertProduct {
                uuid: product.uuid,
                tenant: tenant.uuid,
                category,
                name: product.name,
                description: product.description,
                price: product.price,
                refund_policy: product.refund_policy,
                content: product.content,
                image: product.image,
                tags: product.tags,
            })
            .await?;

        info!(product_uuid = %created.uuid, "created product");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of the products matching a listing request.
    async fn list_products(
        &self,
        params: FilterParams,
    ) -> Result<Page<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product for an onboarded tenant.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use dabro::{categories::UnknownCategoryPolicy, sorting::SortMode};
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::MockCategoriesService,
            products::{MockProductsRepository, records::RefundPolicy},
            tenants::MockTenantsService,
        },
        store::StoreError,
        test::{
            TestContext,
            fixtures::{new_category, new_product},
        },
    };

    use super::*;

    /// A store with a two-level category tree and products across two tenants.
    ///
    /// | name    | price | category | tags        | tenant  |
    /// |---------|-------|----------|-------------|---------|
    /// | Anvil   | 5     | design   | a           | store-x |
    /// | Brush   | 10    | ui       | b           | store-x |
    /// | Canvas  | 15    | ux       | a, b        | store-y |
    /// | Dice    | 20    | books    | c           | store-x |
    /// | Easel   | 10    | -        | -           | store-y |
    async fn seeded() -> TestResult<TestContext> {
        let ctx = TestContext::new();

        seed(&ctx).await?;

        Ok(ctx)
    }

    async fn seed(ctx: &TestContext) -> TestResult {
        ctx.onboarded_tenant("store-x").await?;
        ctx.onboarded_tenant("store-y").await?;

        for (slug, parent) in [
            ("design", None),
            ("ui", Some("design")),
            ("ux", Some("design")),
            ("books", None),
        ] {
            ctx.categories
                .create_category(new_category(slug, parent))
                .await?;
        }

        for (name, price, category, tags, tenant) in [
            ("Anvil", 5, Some("design"), vec!["a"], "store-x"),
            ("Brush", 10, Some("ui"), vec!["b"], "store-x"),
            ("Canvas", 15, Some("ux"), vec!["a", "b"], "store-y"),
            ("Dice", 20, Some("books"), vec!["c"], "store-x"),
            ("Easel", 10, None, vec![], "store-y"),
        ] {
            ctx.products
                .create_product(NewProduct {
                    category: category.map(str::to_string),
                    tags: tags.into_iter().map(str::to_string).collect(),
                    ..new_product(tenant, name, price)
                })
                .await?;
        }

        Ok(())
    }

    async fn names(ctx: &TestContext, params: FilterParams) -> TestResult<Vec<String>> {
        let page = ctx
            .products
            .list_products(params.with_page(1, 100))
            .await?;

        Ok(page.docs.into_iter().map(|product| product.name).collect())
    }

    async fn name_set(ctx: &TestContext, params: FilterParams) -> TestResult<BTreeSet<String>> {
        Ok(names(ctx, params).await?.into_iter().collect())
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn unconstrained_query_matches_everything() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default()).await?,
            set(&["Anvil", "Brush", "Canvas", "Dice", "Easel"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn parent_category_includes_subcategories() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default().with_category("design")).await?,
            set(&["Anvil", "Brush", "Canvas"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn leaf_category_matches_itself_only() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default().with_category("ui")).await?,
            set(&["Brush"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_matches_everything_by_default() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            names(&ctx, FilterParams::default().with_category("does-not-exist")).await?,
            names(&ctx, FilterParams::default()).await?
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_category_can_match_nothing() -> TestResult {
        let ctx = TestContext::with_policy(UnknownCategoryPolicy::MatchNone);
        seed(&ctx).await?;

        let page = ctx
            .products
            .list_products(FilterParams::default().with_category("does-not-exist"))
            .await?;

        assert!(page.docs.is_empty(), "unknown category should match nothing");
        assert_eq!(page.total_docs, 0);

        Ok(())
    }

    #[tokio::test]
    async fn price_bounds_are_inclusive() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default().with_price(Some("10"), Some("15"))).await?,
            set(&["Brush", "Canvas", "Easel"])
        );
        assert_eq!(
            name_set(&ctx, FilterParams::default().with_price(Some("15"), None)).await?,
            set(&["Canvas", "Dice"])
        );
        assert_eq!(
            name_set(&ctx, FilterParams::default().with_price(None, Some("5"))).await?,
            set(&["Anvil"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn malformed_price_matches_nothing() -> TestResult {
        let ctx = seeded().await?;

        let result = names(&ctx, FilterParams::default().with_price(Some("cheap"), None)).await?;

        assert!(result.is_empty(), "malformed bound should match nothing");

        Ok(())
    }

    #[tokio::test]
    async fn tags_match_any_of_the_requested_names() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default().with_tags(["a", "b"])).await?,
            set(&["Anvil", "Brush", "Canvas"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn tenant_scopes_the_listing() -> TestResult {
        let ctx = seeded().await?;

        assert_eq!(
            name_set(&ctx, FilterParams::default().with_tenant("store-x")).await?,
            set(&["Anvil", "Brush", "Dice"])
        );
        assert_eq!(
            name_set(
                &ctx,
                FilterParams::default()
                    .with_tenant("store-y")
                    .with_tags(["a", "b", "c"])
            )
            .await?,
            set(&["Canvas"])
        );

        Ok(())
    }

    #[tokio::test]
    async fn sort_modes_order_deterministically() -> TestResult {
        let ctx = seeded().await?;

        let trending = FilterParams::default().with_sort(SortMode::Trending);

        assert_eq!(
            names(&ctx, trending.clone()).await?,
            ["Anvil", "Brush", "Canvas", "Dice", "Easel"]
        );
        assert_eq!(names(&ctx, trending.clone()).await?, names(&ctx, trending).await?);

        let newest = ["Easel", "Dice", "Canvas", "Brush", "Anvil"];

        assert_eq!(
            names(&ctx, FilterParams::default().with_sort(SortMode::HotAndNew)).await?,
            newest
        );
        assert_eq!(names(&ctx, FilterParams::default()).await?, newest);
        assert_eq!(
            names(&ctx, FilterParams::default().with_sort(SortMode::Curated)).await?,
            ["Anvil", "Brush", "Canvas", "Dice", "Easel"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn combined_filters_intersect() -> TestResult {
        let ctx = seeded().await?;

        let expected = {
            let mut intersection =
                name_set(&ctx, FilterParams::default().with_category("design")).await?;

            for params in [
                FilterParams::default().with_price(Some("10"), None),
                FilterParams::default().with_tags(["b"]),
                FilterParams::default().with_tenant("store-x"),
            ] {
                let matched = name_set(&ctx, params).await?;

                intersection.retain(|name| matched.contains(name));
            }

            intersection
        };

        let combined = FilterParams::default()
            .with_category("design")
            .with_price(Some("10"), None)
            .with_tags(["b"])
            .with_tenant("store-x");

        assert_eq!(name_set(&ctx, combined).await?, expected);
        assert_eq!(expected, set(&["Brush"]));

        Ok(())
    }

    #[tokio::test]
    async fn pages_report_more_results() -> TestResult {
        let ctx = seeded().await?;

        let first = ctx
            .products
            .list_products(FilterParams::default().with_page(1, 2))
            .await?;
        let last = ctx
            .products
            .list_products(FilterParams::default().with_page(3, 2))
            .await?;

        assert_eq!(first.docs.len(), 2);
        assert_eq!(first.total_docs, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.next_cursor(), Some(2));
        assert_eq!(last.docs.len(), 1);
        assert_eq!(last.next_cursor(), None);

        Ok(())
    }

    #[tokio::test]
    async fn listing_populates_relations() -> TestResult {
        let ctx = seeded().await?;

        let page = ctx
            .products
            .list_products(FilterParams::default().with_category("ui"))
            .await?;

        let brush = page.docs.first().ok_or("Brush should be listed")?;

        assert_eq!(
            brush
                .category
                .as_ref()
                .and_then(|category| category.populated())
                .map(|category| category.slug.as_str()),
            Some("ui")
        );
        assert_eq!(
            brush.tenant.populated().map(|tenant| tenant.slug.as_str()),
            Some("store-x")
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_products_skips_resolution_without_category() -> TestResult {
        let mut categories = MockCategoriesService::new();
        let mut repository = MockProductsRepository::new();

        categories.expect_resolve_category_scope().never();
        repository
            .expect_find_products()
            .once()
            .withf(|query| query.predicate.is_unconstrained())
            .returning(|query| Ok(Page::new(Vec::new(), 0, query.page)));

        let service = StoreProductsService::new(
            Arc::new(repository),
            Arc::new(categories),
            Arc::new(MockTenantsService::new()),
            QueryCompiler::default(),
        );

        service.list_products(FilterParams::default()).await?;

        Ok(())
    }

    #[tokio::test]
    async fn list_products_propagates_store_errors() {
        let mut repository = MockProductsRepository::new();

        repository
            .expect_find_products()
            .once()
            .returning(|_| Err(StoreError::Sql(sqlx::Error::PoolTimedOut)));

        let service = StoreProductsService::new(
            Arc::new(repository),
            Arc::new(MockCategoriesService::new()),
            Arc::new(MockTenantsService::new()),
            QueryCompiler::default(),
        );

        let result = service.list_products(FilterParams::default()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::Store(_))),
            "expected store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_rejects_negative_price() -> TestResult {
        let ctx = TestContext::new();
        ctx.onboarded_tenant("store-x").await?;

        let result = ctx
            .products
            .create_product(new_product("store-x", "Refund", -1))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NegativePrice)),
            "expected NegativePrice, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_sub_cent_prices() -> TestResult {
        let ctx = TestContext::new();
        ctx.onboarded_tenant("store-x").await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                price: Decimal::new(10_555, 3),
                ..new_product("store-x", "Icons", 0)
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::PriceTooPrecise)),
            "expected PriceTooPrecise, got {result:?}"
        );

        let trailing_zeros = ctx
            .products
            .create_product(NewProduct {
                price: Decimal::new(10_500, 3),
                ..new_product("store-x", "Fonts", 0)
            })
            .await?;

        assert_eq!(trailing_zeros.price, Decimal::new(105, 1));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_accepts_free_products() -> TestResult {
        let ctx = TestContext::new();
        ctx.onboarded_tenant("store-x").await?;

        let product = ctx
            .products
            .create_product(new_product("store-x", "Freebie", 0))
            .await?;

        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.refund_policy, RefundPolicy::ThirtyDays);

        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_onboarded_tenant() -> TestResult {
        let ctx = TestContext::new();
        ctx.tenant("store-x").await?;

        let result = ctx
            .products
            .create_product(new_product("store-x", "Early", 10))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::TenantNotOnboarded)),
            "expected TenantNotOnboarded, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_requires_known_tenant_and_category() -> TestResult {
        let ctx = TestContext::new();

        let result = ctx
            .products
            .create_product(new_product("nobody", "Ghost", 10))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::TenantNotFound)),
            "expected TenantNotFound, got {result:?}"
        );

        ctx.onboarded_tenant("store-x").await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                category: Some("missing".to_string()),
                ..new_product("store-x", "Lost", 10)
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::CategoryNotFound)),
            "expected CategoryNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_returns_created_product() -> TestResult {
        let ctx = TestContext::new();
        ctx.onboarded_tenant("store-x").await?;

        let created = ctx
            .products
            .create_product(NewProduct {
                tags: vec!["figma".to_string(), "figma".to_string()],
                ..new_product("store-x", "Icons", 12)
            })
            .await?;

        let fetched = ctx.products.get_product(created.uuid).await?;

        assert_eq!(fetched, created);
        assert_eq!(fetched.tags.len(), 1, "duplicate tag names attach once");

        Ok(())
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let ctx = TestContext::new();

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
