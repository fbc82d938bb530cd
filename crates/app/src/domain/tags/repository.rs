//! Tags Repository

use std::hash::Hash;

use async_trait::async_trait;
use dabro::pagination::{Page, PageRequest};
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use sqlx::{PgPool, Postgres, Transaction, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    domain::tags::{
        Taggable,
        records::{TagRecord, TagUuid},
    },
    store::StoreError,
};

const SYNC_TAGS_SQL: &str = include_str!("sql/sync_tags.sql");
const CREATE_TAGGABLES_SQL: &str = include_str!("sql/create_taggables.sql");
const LIST_TAGGABLE_TAGS_SQL: &str = include_str!("sql/list_taggable_tags.sql");
const LIST_TAGS_SQL: &str = include_str!("sql/list_tags.sql");
const COUNT_TAGS_SQL: &str = include_str!("sql/count_tags.sql");

#[automock]
#[async_trait]
pub trait TagsRepository: Send + Sync {
    /// One page of tags, ordered by name.
    async fn list_tags(&self, page: PageRequest) -> Result<Page<TagRecord>, StoreError>;
}

#[derive(Debug, Clone)]
pub struct PgTagsRepository {
    pool: PgPool,
}

impl PgTagsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(
        name = "tags.repository.sync_tags",
        skip(self, tx),
        fields(
            names_count = tracing::field::Empty,
            synced_tag_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn sync_tags(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        names: &[&str],
    ) -> Result<FxHashMap<String, TagUuid>, sqlx::Error> {
        let mut seen = FxHashSet::default();
        let names: Vec<String> = names
            .iter()
            .filter(|name| seen.insert(**name))
            .map(|name| (*name).to_owned())
            .collect();

        tracing::Span::current().record("names_count", names.len());

        if names.is_empty() {
            return Ok(FxHashMap::default());
        }

        let new_uuids: Vec<Uuid> = names.iter().map(|_| Uuid::now_v7()).collect();

        let rows: Vec<(Uuid, String)> = query_as(SYNC_TAGS_SQL)
            .bind(&new_uuids)
            .bind(&names)
            .fetch_all(&mut **tx)
            .await?;

        let tag_map: FxHashMap<String, TagUuid> = rows
            .into_iter()
            .map(|(uuid, name)| (name, TagUuid::from_uuid(uuid)))
            .collect();

        let synced_tag_count = tag_map.len();

        tracing::Span::current().record("synced_tag_count", synced_tag_count);

        debug!(synced_tag_count, "synchronized tags");

        Ok(tag_map)
    }

    #[tracing::instrument(
        name = "tags.repository.tag",
        skip(self, tx, taggable, names),
        fields(
            taggable_type = tracing::field::Empty,
            pair_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn tag<T>(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        taggable: T,
        names: &[String],
    ) -> Result<(), sqlx::Error>
    where
        T: Taggable + Copy + Into<Uuid>,
    {
        tracing::Span::current().record("taggable_type", T::type_as_str());

        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let tag_map = self.sync_tags(tx, &names).await?;

        let pair_count = tag_map.len();

        tracing::Span::current().record("pair_count", pair_count);

        if tag_map.is_empty() {
            return Ok(());
        }

        let tag_uuids: Vec<Uuid> = tag_map.values().map(|tag| tag.into_uuid()).collect();
        let taggable_uuids: Vec<Uuid> = vec![taggable.into(); tag_uuids.len()];

        query(CREATE_TAGGABLES_SQL)
            .bind(&tag_uuids)
            .bind(&taggable_uuids)
            .bind(T::type_as_str())
            .execute(&mut **tx)
            .await?;

        debug!(
            pair_count,
            taggable_type = T::type_as_str(),
            "created taggables"
        );

        Ok(())
    }

    #[tracing::instrument(
        name = "tags.repository.list_taggable_tags",
        skip(self, tx, taggables),
        fields(
            taggable_type = tracing::field::Empty,
            taggable_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn list_taggable_tags<T>(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        taggables: &[T],
    ) -> Result<FxHashMap<T, Vec<TagRecord>>, sqlx::Error>
    where
        T: Taggable + Copy + Eq + Hash + From<Uuid> + Into<Uuid>,
    {
        tracing::Span::current().record("taggable_type", T::type_as_str());
        tracing::Span::current().record("taggable_count", taggables.len());

        if taggables.is_empty() {
            return Ok(FxHashMap::default());
        }

        let uuids: Vec<Uuid> = taggables.iter().copied().map(Into::into).collect();

        let rows: Vec<(Uuid, Uuid, String)> = query_as(LIST_TAGGABLE_TAGS_SQL)
            .bind(T::type_as_str())
            .bind(&uuids)
            .fetch_all(&mut **tx)
            .await?;

        let mut tags: FxHashMap<T, Vec<TagRecord>> = FxHashMap::default();

        for (taggable, uuid, name) in rows {
            tags.entry(T::from(taggable)).or_default().push(TagRecord {
                uuid: TagUuid::from_uuid(uuid),
                name,
            });
        }

        Ok(tags)
    }
}

#[async_trait]
impl TagsRepository for PgTagsRepository {
    #[tracing::instrument(
        name = "tags.repository.list_tags",
        skip(self),
        fields(page = page.page(), limit = page.limit()),
        err
    )]
    async fn list_tags(&self, page: PageRequest) -> Result<Page<TagRecord>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let rows: Vec<(Uuid, String)> = query_as(LIST_TAGS_SQL)
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&mut *tx)
            .await?;

        let total: i64 = query_scalar(COUNT_TAGS_SQL).fetch_one(&mut *tx).await?;

        tx.commit().await?;

        let tags = rows
            .into_iter()
            .map(|(uuid, name)| TagRecord {
                uuid: TagUuid::from_uuid(uuid),
                name,
            })
            .collect();

        Ok(Page::new(tags, u64::try_from(total).unwrap_or_default(), page))
    }
}
