//! Tag Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dabro::pagination::Page;
use dabro_app::domain::tags::{data::ListTags, records::TagRecord};

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TagResponse {
    pub uuid: Uuid,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagsResponse {
    /// Tags on this page, ordered by name
    pub docs: Vec<TagResponse>,
    pub total_docs: u64,
    pub total_pages: u64,
    pub page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub next_cursor: Option<u32>,
}

impl From<Page<TagRecord>> for TagsResponse {
    fn from(page: Page<TagRecord>) -> Self {
        Self {
            next_cursor: page.next_cursor(),
            docs: page
                .docs
                .into_iter()
                .map(|tag| TagResponse {
                    uuid: tag.uuid.into(),
                    name: tag.name,
                })
                .collect(),
            total_docs: page.total_docs,
            total_pages: page.total_pages,
            page: page.page,
            has_next_page: page.has_next_page,
            has_prev_page: page.has_prev_page,
        }
    }
}

/// Tag Index Handler
///
/// Returns one page of tags, ten per page unless `limit` says otherwise.
#[endpoint(tags("tags"), summary = "List Tags")]
pub(crate) async fn handler(
    cursor: QueryParam<String, false>,
    limit: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<TagsResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let defaults = ListTags::default();

    let request = ListTags {
        cursor: parse_or(cursor.into_inner(), defaults.cursor, "invalid cursor")?,
        limit: parse_or(limit.into_inner(), defaults.limit, "invalid limit")?,
    };

    let tags = state
        .app
        .tags
        .list_tags(request)
        .await
        .or_500("failed to list tags")?;

    Ok(Json(tags.into()))
}

fn parse_or(value: Option<String>, default: u32, brief: &str) -> Result<u32, StatusError> {
    value
        .filter(|value| !value.is_empty())
        .map_or(Ok(default), |value| value.parse::<u32>())
        .or_400(brief)
}
