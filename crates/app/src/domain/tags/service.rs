//! Tags service.

use std::sync::Arc;

use async_trait::async_trait;
use dabro::pagination::Page;
use mockall::automock;

use crate::domain::tags::{
    TagsRepository, data::ListTags, errors::TagsServiceError, records::TagRecord,
};

#[derive(Clone)]
pub struct StoreTagsService {
    repository: Arc<dyn TagsRepository>,
}

impl StoreTagsService {
    #[must_use]
    pub fn new(repository: Arc<dyn TagsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TagsService for StoreTagsService {
    async fn list_tags(&self, request: ListTags) -> Result<Page<TagRecord>, TagsServiceError> {
        Ok(self.repository.list_tags(request.page_request()).await?)
    }
}

#[automock]
#[async_trait]
pub trait TagsService: Send + Sync {
    /// Retrieve one page of tags.
    async fn list_tags(&self, request: ListTags) -> Result<Page<TagRecord>, TagsServiceError>;
}

#[cfg(test)]
mod tests {
    use dabro::pagination::PageRequest;
    use mockall::predicate::eq;
    use testresult::TestResult;

    use crate::{
        domain::{
            products::data::NewProduct,
            tags::{MockTagsRepository, data::DEFAULT_TAGS_LIMIT},
        },
        store::StoreError,
        test::{TestContext, fixtures::new_product},
    };

    use super::*;

    #[tokio::test]
    async fn test_list_tags_defaults_to_ten_per_page() -> TestResult {
        let mut repository = MockTagsRepository::new();

        repository
            .expect_list_tags()
            .once()
            .with(eq(PageRequest::new(1, DEFAULT_TAGS_LIMIT)))
            .returning(|page| Ok(Page::new(Vec::new(), 0, page)));

        let service = StoreTagsService::new(Arc::new(repository));

        let page = service.list_tags(ListTags::default()).await?;

        assert!(page.docs.is_empty(), "no tags exist");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_tags_propagates_store_errors() {
        let mut repository = MockTagsRepository::new();

        repository
            .expect_list_tags()
            .once()
            .returning(|_| Err(StoreError::Sql(sqlx::Error::PoolTimedOut)));

        let service = StoreTagsService::new(Arc::new(repository));

        let result = service.list_tags(ListTags::default()).await;

        assert!(
            matches!(result, Err(TagsServiceError::Store(StoreError::Sql(_)))),
            "expected store error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn test_list_tags_pages_by_name() -> TestResult {
        let ctx = TestContext::new();
        ctx.onboarded_tenant("store-x").await?;

        for (name, tags) in [("Icons", ["figma", "icons"]), ("Brushes", ["procreate", "figma"])] {
            ctx.products
                .create_product(NewProduct {
                    tags: tags.iter().map(ToString::to_string).collect(),
                    ..new_product("store-x", name, 10)
                })
                .await?;
        }

        let page = ctx.tags.list_tags(ListTags { cursor: 2, limit: 2 }).await?;

        let names: Vec<&str> = page.docs.iter().map(|tag| tag.name.as_str()).collect();

        assert_eq!(names, ["procreate"]);
        assert_eq!(page.total_docs, 3);
        assert!(page.has_prev_page, "second page follows the first");
        assert!(!page.has_next_page, "three tags fit on two pages");

        Ok(())
    }
}
