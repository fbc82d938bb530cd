//! Media

use sqlx::{Row, postgres::PgRow};
use uuid::Uuid;

use crate::uuids::TypedUuid;

/// Media UUID
pub type MediaUuid = TypedUuid<MediaRecord>;

/// An uploaded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRecord {
    pub uuid: MediaUuid,
    pub url: String,
    pub alt: Option<String>,
}

impl MediaRecord {
    /// Decode media joined into `row` under `prefix`. Absent when the join found nothing.
    pub(crate) fn from_prefixed_row(row: &PgRow, prefix: &str) -> sqlx::Result<Option<Self>> {
        let Some(uuid) = row.try_get::<Option<Uuid>, _>(format!("{prefix}uuid").as_str())? else {
            return Ok(None);
        };

        Ok(Some(Self {
            uuid: MediaUuid::from_uuid(uuid),
            url: row.try_get(format!("{prefix}url").as_str())?,
            alt: row.try_get(format!("{prefix}alt").as_str())?,
        }))
    }
}
