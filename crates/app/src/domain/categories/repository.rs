//! Categories Repository

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    domain::categories::{
        data::InsertCategory,
        records::{CategoryRecord, CategoryUuid},
    },
    store::StoreError,
};

const FIND_CATEGORY_BY_SLUG_SQL: &str = include_str!("sql/find_category_by_slug.sql");
const LIST_CHILD_CATEGORIES_SQL: &str = include_str!("sql/list_child_categories.sql");
const LIST_ROOT_CATEGORIES_SQL: &str = include_str!("sql/list_root_categories.sql");
const CREATE_CATEGORY_SQL: &str = include_str!("sql/create_category.sql");

#[automock]
#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError>;

    /// Direct children of any of `parents`, ordered by name.
    async fn list_children(
        &self,
        parents: &[CategoryUuid],
    ) -> Result<Vec<CategoryRecord>, StoreError>;

    /// Top-level categories, ordered by name.
    async fn list_roots(&self) -> Result<Vec<CategoryRecord>, StoreError>;

    async fn create_category(
        &self,
        category: InsertCategory,
    ) -> Result<CategoryRecord, StoreError>;
}

/// PostgreSQL-backed categories repository.
#[derive(Debug, Clone)]
pub struct PgCategoriesRepository {
    pool: PgPool,
}

impl PgCategoriesRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriesRepository for PgCategoriesRepository {
    #[tracing::instrument(name = "categories.repository.find_by_slug", skip(self), err)]
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CategoryRecord>, StoreError> {
        Ok(
            query_as::<Postgres, CategoryRecord>(FIND_CATEGORY_BY_SLUG_SQL)
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    #[tracing::instrument(
        name = "categories.repository.list_children",
        skip(self, parents),
        fields(parent_count = parents.len()),
        err
    )]
    async fn list_children(
        &self,
        parents: &[CategoryUuid],
    ) -> Result<Vec<CategoryRecord>, StoreError> {
        if parents.is_empty() {
            return Ok(Vec::new());
        }

        let parents: Vec<Uuid> = parents.iter().copied().map(Into::into).collect();

        Ok(
            query_as::<Postgres, CategoryRecord>(LIST_CHILD_CATEGORIES_SQL)
                .bind(&parents)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    #[tracing::instrument(name = "categories.repository.list_roots", skip(self), err)]
    async fn list_roots(&self) -> Result<Vec<CategoryRecord>, StoreError> {
        Ok(
            query_as::<Postgres, CategoryRecord>(LIST_ROOT_CATEGORIES_SQL)
                .fetch_all(&self.pool)
                .await?,
        )
    }

    #[tracing::instrument(
        name = "categories.repository.create_category",
        skip(self, category),
        fields(category_uuid = %category.uuid, slug = %category.slug),
        err
    )]
    async fn create_category(
        &self,
        category: InsertCategory,
    ) -> Result<CategoryRecord, StoreError> {
        Ok(query_as::<Postgres, CategoryRecord>(CREATE_CATEGORY_SQL)
            .bind(category.uuid.into_uuid())
            .bind(category.name)
            .bind(category.slug)
            .bind(category.color)
            .bind(category.parent.map(CategoryUuid::into_uuid))
            .fetch_one(&self.pool)
            .await?)
    }
}

impl CategoryRecord {
    /// Decode a category joined into `row` under `prefix`. Absent when the join found nothing.
    pub(crate) fn from_prefixed_row(row: &PgRow, prefix: &str) -> sqlx::Result<Option<Self>> {
        let column = |name: &str| format!("{prefix}{name}");

        let Some(uuid) = row.try_get::<Option<Uuid>, _>(column("uuid").as_str())? else {
            return Ok(None);
        };

        Ok(Some(Self {
            uuid: CategoryUuid::from_uuid(uuid),
            name: row.try_get(column("name").as_str())?,
            slug: row.try_get(column("slug").as_str())?,
            color: row.try_get(column("color").as_str())?,
            parent: row
                .try_get::<Option<Uuid>, _>(column("parent_uuid").as_str())?
                .map(CategoryUuid::from_uuid),
            created_at: row
                .try_get::<SqlxTimestamp, _>(column("created_at").as_str())?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>(column("updated_at").as_str())?
                .to_jiff(),
        }))
    }
}

impl<'r> FromRow<'r, PgRow> for CategoryRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Self::from_prefixed_row(row, "")?.ok_or_else(|| sqlx::Error::ColumnNotFound("uuid".into()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::db::TestDb;

    use super::*;

    fn insert(slug: &str, parent: Option<CategoryUuid>) -> InsertCategory {
        InsertCategory {
            uuid: CategoryUuid::new(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            color: None,
            parent,
        }
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn test_children_and_roots() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCategoriesRepository::new(db.pool().clone());

        let design = repository.create_category(insert("design", None)).await?;
        let ui = repository
            .create_category(insert("ui", Some(design.uuid)))
            .await?;
        repository.create_category(insert("books", None)).await?;

        let roots: Vec<String> = repository
            .list_roots()
            .await?
            .into_iter()
            .map(|category| category.slug)
            .collect();

        assert_eq!(roots, ["books", "design"]);
        assert_eq!(repository.list_children(&[design.uuid]).await?, [ui]);
        assert_eq!(
            repository.find_by_slug("design").await?.map(|c| c.uuid),
            Some(design.uuid)
        );
        assert_eq!(repository.find_by_slug("missing").await?, None);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn test_roots_order_names_bytewise() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCategoriesRepository::new(db.pool().clone());

        for (slug, name) in [("apps", "apps"), ("zines", "Zines")] {
            repository
                .create_category(InsertCategory {
                    name: name.to_string(),
                    ..insert(slug, None)
                })
                .await?;
        }

        let names: Vec<String> = repository
            .list_roots()
            .await?
            .into_iter()
            .map(|category| category.name)
            .collect();

        assert_eq!(names, ["Zines", "apps"]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon"]
    async fn test_unknown_parent_is_invalid_reference() -> TestResult {
        let db = TestDb::new().await;
        let repository = PgCategoriesRepository::new(db.pool().clone());

        let result = repository
            .create_category(insert("orphan", Some(CategoryUuid::new())))
            .await;

        assert!(
            matches!(result, Err(StoreError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }
}
