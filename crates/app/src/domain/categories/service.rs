//! Categories service.

use std::sync::Arc;

use async_trait::async_trait;
use dabro::categories::CategoryScope;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::domain::categories::{
    CategoriesRepository,
    data::{InsertCategory, NewCategory},
    errors::CategoriesServiceError,
    records::{CategoryRecord, CategoryTree, CategoryUuid},
};

#[derive(Clone)]
pub struct StoreCategoriesService {
    repository: Arc<dyn CategoriesRepository>,
}

impl StoreCategoriesService {
    #[must_use]
    pub fn new(repository: Arc<dyn CategoriesRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CategoriesService for StoreCategoriesService {
    #[tracing::instrument(
        name = "categories.service.resolve_category_scope",
        skip(self),
        fields(scope_size = tracing::field::Empty),
        err
    )]
    async fn resolve_category_scope(
        &self,
        slug: &str,
    ) -> Result<CategoryScope, CategoriesServiceError> {
        let Some(category) = self.repository.find_by_slug(slug).await? else {
            debug!("category not found");

            return Ok(CategoryScope::empty());
        };

        let children = self.repository.list_children(&[category.uuid]).await?;

        let scope = CategoryScope::from_family(
            &category.slug,
            children.iter().map(|child| child.slug.as_str()),
        );

        tracing::Span::current().record("scope_size", scope.slugs().len());

        Ok(scope)
    }

    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or(CategoriesServiceError::NotFound)
    }

    async fn list_categories(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError> {
        let roots = self.repository.list_roots().await?;
        let uuids: Vec<CategoryUuid> = roots.iter().map(|root| root.uuid).collect();

        let mut children: FxHashMap<CategoryUuid, Vec<CategoryRecord>> = FxHashMap::default();

        for child in self.repository.list_children(&uuids).await? {
            if let Some(parent) = child.parent {
                children.entry(parent).or_default().push(child);
            }
        }

        Ok(roots
            .into_iter()
            .map(|category| CategoryTree {
                subcategories: children.remove(&category.uuid).unwrap_or_default(),
                category,
            })
            .collect())
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError> {
        if category.slug.trim().is_empty() {
            return Err(CategoriesServiceError::EmptySlug);
        }

        let parent = match category.parent.as_deref() {
            Some(slug) => {
                let parent = self
                    .repository
                    .find_by_slug(slug)
                    .await?
                    .ok_or(CategoriesServiceError::ParentNotFound)?;

                if !parent.is_root() {
                    return Err(CategoriesServiceError::NestingTooDeep);
                }

                Some(parent.uuid)
            }
            None => None,
        };

        let created = self
            .repository
            .create_category(InsertCategory {
                uuid: category.uuid,
                name: category.name,
                slug: category.slug,
                color: category.color,
                parent,
            })
            .await?;

        info!(category_uuid = %created.uuid, slug = %created.slug, "created category");

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Resolve a category slug to the slugs a product listing should match: the category and
    /// its direct subcategories. An unknown slug resolves to an empty scope.
    async fn resolve_category_scope(
        &self,
        slug: &str,
    ) -> Result<CategoryScope, CategoriesServiceError>;

    /// Retrieve a category by slug.
    async fn get_category(&self, slug: &str) -> Result<CategoryRecord, CategoriesServiceError>;

    /// Top-level categories with their subcategories.
    async fn list_categories(&self) -> Result<Vec<CategoryTree>, CategoriesServiceError>;

    /// Creates a category, or a subcategory when a parent slug is given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<CategoryRecord, CategoriesServiceError>;
}
