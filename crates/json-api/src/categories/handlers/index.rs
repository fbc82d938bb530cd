//! Category Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dabro_app::domain::categories::records::{CategoryRecord, CategoryTree};

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,

    /// Accent color as CSS
    pub color: Option<String>,
}

impl From<CategoryRecord> for SubcategoryResponse {
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
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,

    /// Accent color as CSS
    pub color: Option<String>,

    /// Subcategories, ordered by name
    pub subcategories: Vec<SubcategoryResponse>,
}

impl From<CategoryTree> for CategoryResponse {
    fn from(tree: CategoryTree) -> Self {
        Self {
            uuid: tree.category.uuid.into(),
            name: tree.category.name,
            slug: tree.category.slug,
            color: tree.category.color,
            subcategories: tree.subcategories.into_iter().map(Into::into).collect(),
        }
    }
}

/// Category Index Handler
///
/// Returns the category navigation tree: top-level categories with their subcategories.
#[endpoint(tags("categories"), summary = "List Categories")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Vec<CategoryResponse>>, StatusError> {
    let state = depot.state_or_500()?;

    let categories = state
        .app
        .categories
        .list_categories()
        .await
        .or_500("failed to list categories")?;

    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
mod tests {
    use dabro_app::{domain::categories::CategoriesServiceError, store::StoreError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_category};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.service(Router::with_path("categories").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_nested_categories() -> TestResult {
        let mut mocks = Mocks::default();
        let books = make_category("books", None);
        let fiction = make_category("fiction", Some(books.uuid));

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(move || {
                Ok(vec![CategoryTree {
                    category: books,
                    subcategories: vec![fiction],
                }])
            });

        let response: Vec<CategoryResponse> = TestClient::get("http://example.com/categories")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        let books = response.first().ok_or("expected a category")?;

        assert_eq!(books.slug, "books");
        assert_eq!(
            books
                .subcategories
                .iter()
                .map(|sub| sub.slug.as_str())
                .collect::<Vec<_>>(),
            ["fiction"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_index_store_failure_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .categories
            .expect_list_categories()
            .once()
            .return_once(|| Err(CategoriesServiceError::Store(StoreError::InvalidData)));

        let res = TestClient::get("http://example.com/categories")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
