//! Category Data

use crate::domain::categories::records::CategoryUuid;

/// New Category Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,

    /// Slug of the parent category, for subcategories.
    pub parent: Option<String>,
}

/// Category row to insert, with its parent resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertCategory {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub parent: Option<CategoryUuid>,
}
